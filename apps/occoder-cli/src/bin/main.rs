use std::env;
use std::path::PathBuf;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use occoder_core::config::Config;
use occoder_core::types::{OutputMode, Table};
use occoder_match::{code_table, BatchOptions, Coder};

struct Args {
    in_file: Option<PathBuf>,
    out_file: Option<PathBuf>,
    scheme: String,
    output: String,
    title_col: String,
    sector_col: String,
    description_col: String,
    parallel: bool,
    labels: bool,
}

fn parse_args(config: &Config) -> Args {
    let mut parsed = Args {
        in_file: None,
        out_file: None,
        scheme: config.get("coder.scheme").unwrap_or_else(|_| "soc".to_string()),
        output: config.get("coder.output").unwrap_or_else(|_| "single".to_string()),
        title_col: config
            .get("coder.title_column")
            .unwrap_or_else(|_| "job_title".to_string()),
        sector_col: config.get("coder.sector_column").unwrap_or_default(),
        description_col: config.get("coder.description_column").unwrap_or_default(),
        parallel: false,
        labels: false,
    };
    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--scheme" => parsed.scheme = take_value(&args, &mut i),
            "--output" => parsed.output = take_value(&args, &mut i),
            "--title_col" => parsed.title_col = take_value(&args, &mut i),
            "--sector_col" => parsed.sector_col = take_value(&args, &mut i),
            "--description_col" => parsed.description_col = take_value(&args, &mut i),
            "--in_file" => parsed.in_file = Some(PathBuf::from(take_value(&args, &mut i))),
            "--out_file" => parsed.out_file = Some(PathBuf::from(take_value(&args, &mut i))),
            "--parallel" => parsed.parallel = true,
            "--labels" => parsed.labels = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn take_value(args: &[String], i: &mut usize) -> String {
    if *i + 1 < args.len() {
        *i += 1;
        args[*i].clone()
    } else {
        eprintln!("Error: {} requires a value", args[*i]);
        std::process::exit(1);
    }
}

fn read_csv(path: &PathBuf) -> anyhow::Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect())?;
    }
    Ok(table)
}

fn write_csv(path: &PathBuf, table: &Table) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_head(table: &Table, n: usize) {
    println!("{}", table.columns().join(","));
    for row in table.rows().iter().take(n) {
        println!("{}", row.join(","));
    }
}

fn add_label_column(table: &mut Table, coder: &Coder) -> anyhow::Result<()> {
    let code_column = format!("{}_code", coder.scheme().to_uppercase());
    let source = if table.column_index(&code_column).is_some() {
        code_column
    } else {
        "prediction 1".to_string()
    };
    let Some(codes) = table.column(&source) else {
        return Ok(());
    };
    let labels: Vec<String> = codes
        .iter()
        .map(|code| coder.lexicon().code_label(code).unwrap_or("").to_string())
        .collect();
    table.add_column(&format!("{}_label", coder.scheme().to_uppercase()), labels)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let args = parse_args(&config);

    let in_file = args.in_file.unwrap_or_else(|| {
        let f: String = config
            .get("coder.input_file")
            .unwrap_or_else(|_| "test_data/test_vacancies.csv".to_string());
        PathBuf::from(f)
    });
    let out_file = args
        .out_file
        .unwrap_or_else(|| PathBuf::from("coded_output.csv"));
    let output = OutputMode::parse(&args.output)?;
    let lookup_dir = config.lookup_dir();

    println!("\nRunning coder with the following settings:\n");
    println!("Input file: {}", in_file.display());
    println!("Coding to scheme: {}", args.scheme);
    println!("Output type: {}", args.output);
    println!("Data column job titles: {}", args.title_col);
    println!("Data column job sector: {}", args.sector_col);
    println!("Data column job description: {}", args.description_col);
    println!("Output file: {}\n", out_file.display());

    let mut table = read_csv(&in_file)?;
    let coder = match Coder::new(&lookup_dir, &args.scheme, output) {
        Ok(coder) => coder,
        Err(e) => {
            eprintln!("Error loading scheme '{}': {}", args.scheme, e);
            let available = occoder_lexicon::store::list_schemes(&lookup_dir);
            if !available.is_empty() {
                eprintln!("Available schemes: {}", available.join(", "));
            }
            std::process::exit(1);
        }
    };

    let options = BatchOptions {
        title_column: &args.title_col,
        sector_column: (!args.sector_col.is_empty()).then_some(args.sector_col.as_str()),
        description_column: (!args.description_col.is_empty())
            .then_some(args.description_col.as_str()),
        parallel: args.parallel,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Coding {} rows...", table.len()));
    let started = Instant::now();
    code_table(&coder, &mut table, &options, None)?;
    spinner.finish_and_clear();
    println!("Actual coding ran in: {:.3}s", started.elapsed().as_secs_f64());

    if args.labels {
        add_label_column(&mut table, &coder)?;
    }

    write_csv(&out_file, &table)?;
    println!("occoder message:\nCoding complete. Showing first results...");
    print_head(&table, 5);
    Ok(())
}
