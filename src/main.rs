//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatstats::charts::{CsvChartRenderer, render_charts};
use chatstats::cli::{Args, output_dir};
use chatstats::core::output::write_tables;
use chatstats::core::pipeline::Pipeline;
use chatstats::logging::init_logging;
use chatstats::parser::Parser;
use chatstats::parsers::MessengerParser;
use chatstats::ChatstatsError;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    init_logging(args.log_level.as_deref())?;

    let config = args.analysis_config()?;
    let filter = args.filter_config()?;
    let chart_options = args.chart_options()?;

    // Print header
    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:    {}", args.input);
    println!("💾 Output:   {}", args.output);
    println!("📄 Format:   {}", args.format);
    println!("🌍 Timezone: {}", config.timezone);
    println!("🗓️  Terms:    {} per year", config.terms_per_year);
    if let Some(ref after) = args.after {
        println!("📅 After:    {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:   {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:     {}", from);
    }
    println!();

    // Step 1: Parse
    let parser = MessengerParser::with_config(args.messenger_config());
    println!("⏳ Parsing {} export...", parser.name());
    let parse_start = Instant::now();
    let input = Path::new(&args.input);
    let conversation = parser.parse(input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        conversation.len(),
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Normalize, filter, tokenize, aggregate
    println!("🔬 Analyzing...");
    let analyze_start = Instant::now();
    let pipeline = Pipeline::new(config)?.with_filter(filter);
    let tables = pipeline.run(&conversation.messages)?;
    println!(
        "   {} messages, {} tokens ({:.2}s)",
        tables.stats.filtered,
        tables.stats.tokens,
        analyze_start.elapsed().as_secs_f64()
    );

    // Step 3: Write tables
    let out_dir = output_dir(Path::new(&args.output), conversation.thread_path.as_deref(), input);
    println!("💾 Writing {} tables...", args.format);
    let write_start = Instant::now();
    let written = write_tables(&tables, &out_dir, args.format)?;
    println!(
        "   {} tables written ({:.2}s)",
        written.len(),
        write_start.elapsed().as_secs_f64()
    );

    // Step 4: Charts
    let chart_count = if args.no_charts {
        println!("⏭️  Skipping charts (--no-charts)");
        0
    } else {
        println!("📈 Building charts...");
        let renderer = CsvChartRenderer::new(out_dir.join("charts"));
        let charts = render_charts(&tables, &chart_options, &renderer)?;
        println!("   {} charts written", charts.len());
        charts.len()
    };

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", out_dir.display());

    // Summary
    println!();
    println!("📊 Summary:");
    if let Some(ref title) = conversation.title {
        println!("   Conversation: {}", title);
    }
    println!("   Participants: {}", conversation.participants.len());
    println!("   Messages:     {}", tables.stats.raw);
    if pipeline.filter().is_active() {
        println!(
            "   Filtered:     {} messages ({:.1}% removed)",
            tables.stats.filtered,
            tables.stats.filtered_out_ratio()
        );
    }
    println!("   Words:        {}", tables.tokens.words.len());
    println!("   Bigrams:      {}", tables.tokens.bigrams.len());
    println!("   Trigrams:     {}", tables.tokens.trigrams.len());
    if !args.no_charts {
        println!("   Charts:       {}", chart_count);
    }

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = tables.stats.raw as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}
