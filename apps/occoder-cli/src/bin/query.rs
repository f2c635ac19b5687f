use std::env;

use occoder_core::config::Config;
use occoder_core::types::{JobRecord, MatchResult, OutputMode};
use occoder_match::Coder;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <title> [sector] [description]", args[0]);
        eprintln!("Example: {} 'Physicist' 'Professional scientific' 'Calculations of the universe'", args[0]);
        std::process::exit(1);
    }
    let title = args[1].clone();
    let sector = args.get(2).cloned();
    let description = args.get(3).cloned();

    let config = Config::load()?;
    let scheme: String = config.get("coder.scheme").unwrap_or_else(|_| "soc".to_string());
    let mode = OutputMode::parse(
        &config
            .get::<String>("coder.output")
            .unwrap_or_else(|_| "multi".to_string()),
    )?;
    let lookup_dir = config.lookup_dir();

    println!("🔍 occoder-query\n================");
    println!("Scheme: {}  Title: {}", scheme, title);

    let coder = Coder::new(&lookup_dir, &scheme, mode)?;
    let record = JobRecord { title, sector, description };
    match coder.code_record(&record) {
        MatchResult::Code(code) => {
            let label = coder.lexicon().code_label(&code).unwrap_or("-");
            println!("\n  code={}  label={}", code, label);
        }
        MatchResult::Ranked(ranked) => {
            println!("\nTop candidates:");
            for (i, rc) in ranked.iter().enumerate() {
                let code = rc.code.as_deref().unwrap_or("-");
                let label = rc
                    .code
                    .as_deref()
                    .and_then(|c| coder.lexicon().code_label(c))
                    .unwrap_or("-");
                println!("  {}. code={}  score={}  label={}", i + 1, code, rc.score, label);
            }
        }
        MatchResult::NoMatch => println!("\nNo usable candidate found."),
    }
    Ok(())
}
