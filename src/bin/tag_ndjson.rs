//! Tag an NDJSON file of raw items: `tag_ndjson [INPUT] [OUTPUT]`.
//! Reads stdin / writes stdout when a path is omitted or `-`.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use social_tagger::ingest::ndjson::{read_items, NdjsonBatch};
use social_tagger::SentimentDistribution;

fn open_input(arg: Option<&str>) -> Result<Box<dyn BufRead>> {
    match arg {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(p) => {
            let f = File::open(p).with_context(|| format!("opening input {p}"))?;
            Ok(Box::new(BufReader::new(f)))
        }
    }
}

fn open_output(arg: Option<&str>) -> Result<Box<dyn Write>> {
    match arg {
        None | Some("-") => Ok(Box::new(BufWriter::new(io::stdout()))),
        Some(p) => {
            let f = File::create(p).with_context(|| format!("creating output {p}"))?;
            Ok(Box::new(BufWriter::new(f)))
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    social_tagger::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tagger = social_tagger::build_tagger()?;

    // input fully read before the output is created or truncated
    let input = open_input(args.first().map(String::as_str))?;
    let NdjsonBatch { items, bad_lines } = read_items(input)?;
    let mut output = open_output(args.get(1).map(String::as_str))?;

    let records = tagger.assemble_batch(&items);
    for rec in &records {
        serde_json::to_writer(&mut output, rec).context("writing record")?;
        output.write_all(b"\n")?;
    }
    output.flush()?;

    let dist = SentimentDistribution::from_records(&records);
    tracing::info!(
        read = items.len(),
        written = records.len(),
        bad_lines,
        positive = dist.positive,
        neutral = dist.neutral,
        negative = dist.negative,
        "tag_ndjson done"
    );
    Ok(())
}
