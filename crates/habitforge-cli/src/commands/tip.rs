use habitforge_core::{wisdom, Clock, SystemClock};

pub fn run(today: bool, quote: bool) -> Result<(), Box<dyn std::error::Error>> {
    let date = SystemClock.today();
    if quote {
        let quote = if today {
            wisdom::quote_for(date)
        } else {
            wisdom::random_quote()
        };
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "quote": quote }))?);
        return Ok(());
    }

    let tip = if today {
        wisdom::tip_for(date)
    } else {
        wisdom::random_tip()
    };
    println!("{}", serde_json::to_string_pretty(tip)?);
    Ok(())
}
