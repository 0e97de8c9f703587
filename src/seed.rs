//! The approved 2026 IT plan, loaded on first run and by `reset`.

use rust_decimal::Decimal;

use crate::calc;
use crate::models::{BudgetCategory, BudgetItem, ItemStatus, MonthlyCosts, MONTHS};

pub(crate) const PLAN_YEAR: i32 = 2026;

/// Cost falls entirely in December.
fn year_end(amount: i64) -> MonthlyCosts {
    in_month(11, amount)
}

fn in_month(month: usize, amount: i64) -> MonthlyCosts {
    let mut costs = [Decimal::ZERO; MONTHS];
    costs[month] = Decimal::from(amount);
    costs
}

fn spread(amounts: [i64; MONTHS]) -> MonthlyCosts {
    amounts.map(Decimal::from)
}

fn item(id: &str, description: &str, monthly_costs: MonthlyCosts) -> BudgetItem {
    BudgetItem {
        id: id.to_string(),
        description: description.to_string(),
        status: ItemStatus::Pending,
        monthly_costs,
        total: Decimal::ZERO,
    }
}

fn category(id: &str, title: &str, items: Vec<BudgetItem>) -> BudgetCategory {
    let mut cat = BudgetCategory::new(id.to_string(), title.to_string());
    cat.items = items;
    cat
}

/// Every category of the plan with totals and percentages filled in.
pub(crate) fn plan() -> Vec<BudgetCategory> {
    calc::recalculate_all(vec![
        category(
            "cat-1",
            "SOFTWARE, DEVELOPMENT AND LICENSE RENEWALS",
            vec![
                item("item-1-1", "Antivirus licenses (3 years)", year_end(3000)),
                item("item-1-2", "Annual mail and web server renewal", year_end(250)),
                item("item-1-3", "Annual accounting suite license", year_end(400)),
                item("item-1-4", "Main router configuration and improvements", year_end(750)),
                item("item-1-5", "Payroll module final rollout", year_end(1280)),
                item("item-1-6", "Cloud storage subscription", year_end(300)),
            ],
        ),
        category(
            "cat-2",
            "NETWORK INFRASTRUCTURE, PCS, PRINTERS AND INTERNET",
            vec![
                item("item-2-1", "HPE ProLiant DL360 server", year_end(6000)),
                item("item-2-2", "Replacement 24-port switches", year_end(1200)),
                item("item-2-3", "Mikrotik RB3011UiAS router (backup)", year_end(380)),
                item(
                    "item-2-4",
                    "PC workstations - CPU, monitor, keyboard, mouse",
                    spread([200, 100, 300, 300, 300, 600, 920, 0, 0, 0, 0, 0]),
                ),
                item("item-2-5", "Dot-matrix printer", year_end(370)),
                item("item-2-6", "Multifunction printer", in_month(3, 600)),
                item("item-2-7", "Personal printers", year_end(850)),
                item("item-2-8", "New UPS units for diagnostics and pediatrics", year_end(650)),
                item("item-2-9", "Replacement batteries for network and server UPS", year_end(550)),
                item(
                    "item-2-10",
                    "Photocopier repair and maintenance",
                    spread([270, 270, 270, 270, 0, 0, 0, 0, 0, 0, 0, 0]),
                ),
                item("item-2-11", "Printer maintenance and repair", year_end(300)),
                item("item-2-12", "Replacement voltage regulators", year_end(125)),
                item("item-2-13", "500W power supplies", year_end(125)),
            ],
        ),
        category(
            "cat-3",
            "TELEPHONY",
            vec![
                item("item-3-1", "Replacement analog phones", year_end(168)),
                item("item-3-2", "General maintenance of phone access points", year_end(320)),
                item("item-3-3", "PBX maintenance", year_end(600)),
            ],
        ),
        category(
            "cat-4",
            "SECURITY CAMERAS",
            vec![
                item("item-4-1", "Annual video surveillance maintenance", year_end(600)),
                item("item-4-2", "Video surveillance coverage expansion", year_end(3500)),
            ],
        ),
        category(
            "cat-5",
            "TOOLS AND IMPROVEMENTS",
            vec![
                item("item-5-1", "50-inch smart TV", in_month(4, 340)),
                item("item-5-2", "Wireless mouse and keyboard", year_end(30)),
                item("item-5-3", "Wireless microphone (optional)", year_end(50)),
                item("item-5-4", "Biometric reader with admin door installation", year_end(380)),
                item("item-5-5", "Soldering station", year_end(140)),
                item("item-5-6", "SATA/USB converter", year_end(16)),
                item("item-5-7", "SAS to SATA drive adapter", year_end(20)),
                item("item-5-8", "DisplayPort male to VGA adapter", year_end(20)),
                item("item-5-9", "240 GB solid state drives", year_end(350)),
                item("item-5-10", "2.5/3.5 USB 3.0 drive enclosure", year_end(40)),
                item("item-5-11", "Screwdriver kit", year_end(30)),
            ],
        ),
    ])
}
