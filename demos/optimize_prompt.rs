//! Prompt optimization example.
//!
//! Demonstrates building a `Runtime` from the process environment and
//! running a single prompt through the five-stage pipeline.
//!
//! Run with:
//! ```bash
//! XAI_API_KEY=... SECRET_KEY=... cargo run --example optimize_prompt --features full
//! ```

use promptforge_core::config::Category;
use promptforge_core::record::PromptRequest;
use promptforge_core::store::NullStore;
use promptforge_core::startup::Runtime;

#[ tokio::main ]
async fn main() -> Result< (), Box< dyn core::error::Error > >
{
  let runtime = Runtime::build( NullStore::new() )?;
  let orchestrator = runtime.orchestrator();

  println!( "PromptForge - Optimize Prompt Example\n" );

  let request = PromptRequest::new(
    "write something about dogs",
    Category::Creative,
  );

  println!( "Submitting prompt: {:?}\n", request.raw_text );
  let record = orchestrator.optimize( request ).await;

  if let Some( deconstruction ) = &record.deconstruction
  {
    println!( "Deconstruction:\n{deconstruction}\n" );
  }

  if let Some( diagnosis ) = &record.diagnosis
  {
    println!( "Diagnosis:\n{diagnosis}\n" );
  }

  if let Some( optimized ) = &record.optimized_prompt
  {
    println!( "Optimized Prompt:\n{optimized}\n" );
  }

  if let Some( sample ) = &record.sample_output
  {
    println!( "Sample Output:\n{sample}\n" );
  }

  if let Some( score ) = record.quality_score
  {
    println!( "Quality Score: {score}/100\n" );
  }

  if !record.errors.is_empty()
  {
    println!( "Errors/Warnings:" );
    for error in &record.errors
    {
      println!( "  - {error}" );
    }
  }

  let cost_summary = orchestrator.cost_ledger().summary( None, None );
  println!(
    "\nCost so far: ${:.4} across {} call(s)",
    cost_summary.total_usd, cost_summary.call_count,
  );

  Ok( () )
}
