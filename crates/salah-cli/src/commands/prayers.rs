use clap::Args;
use salah_core::{ColorTag, Prayer};
use serde::Serialize;

#[derive(Args)]
pub struct PrayersArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PrayerRow {
    prayer: Prayer,
    units: Vec<String>,
    total_units: u8,
    color: ColorTag,
}

pub fn run(args: PrayersArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<PrayerRow> = Prayer::ALL
        .iter()
        .map(|p| {
            let detail = p.detail();
            PrayerRow {
                prayer: *p,
                units: detail.units(),
                total_units: detail.total_units(),
                color: detail.color,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in rows {
        println!("{:<8} {}", row.prayer, row.units.join(" · "));
    }
    Ok(())
}
