//! Integration tests for the orchestrator, including end-to-end runs against
//! a scripted `Transport` stub standing in for the real upstream.

use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };
use std::time::{ Duration, Instant };

use promptforge_core::chat::{ ChatChoice, ChatRequest, ChatResponse, ChatResponseMessage, Usage };
use promptforge_core::circuit_breaker::{ CircuitBreaker, CircuitBreakerConfig, CircuitState };
use promptforge_core::config::Category;
use promptforge_core::environment::{ Environment, EnvironmentImpl };
use promptforge_core::error::{ CoreError, Result };
use promptforge_core::model_client::ModelClient;
use promptforge_core::orchestrator::Orchestrator;
use promptforge_core::pool::Transport;
use promptforge_core::record::{ DispatchMode, PromptRequest };
use promptforge_core::retry::RetryConfig;
use promptforge_core::secret::Secret;
use promptforge_core::store::NullStore;

/// One canned response shape serves every role call in a request: a
/// parseable optimized-prompt block, an explanation, and an overall score.
/// The orchestrator never inspects which role it asked; only the Designer's
/// and Evaluator's content is actually parsed, so a single fixture content
/// exercises both.
const HAPPY_CONTENT : &str = "\
Optimized Prompt:
Explain recursion to a junior developer, including one worked example.

Explanation: clarified the audience and required a concrete example.

Overall score: 85/100
";

/// An optimized-prompt block with no parseable score anywhere in the text.
const NO_SCORE_CONTENT : &str = "\
Optimized Prompt:
Write a product description for a reusable water bottle.

Explanation: added a concrete product and audience.
";

/// Carries forbidden identity tokens the persona sanitizer must strip.
const PERSONA_LEAK_CONTENT : &str = "\
Optimized Prompt:
Write a haiku about the ocean.

Explanation: Grok would normally add commentary here, but xAI's style guide keeps it short.

Overall score: 90/100
";

/// A scripted [`Transport`] standing in for the real upstream. The first
/// `fail_first_n` calls return a transient error; every call after that
/// returns `success_content`. Tracks call count and peak concurrent
/// in-flight calls so tests can assert on dispatch behaviour without a real
/// network.
struct StubTransport
{
  success_content : String,
  fail_first_n : usize,
  delay : Duration,
  calls : Mutex< usize >,
  in_flight : AtomicUsize,
  max_in_flight : AtomicUsize,
}

impl StubTransport
{
  fn new( content : impl Into< String > ) -> Self
  {
    Self
    {
      success_content : content.into(),
      fail_first_n : 0,
      delay : Duration::from_millis( 0 ),
      calls : Mutex::new( 0 ),
      in_flight : AtomicUsize::new( 0 ),
      max_in_flight : AtomicUsize::new( 0 ),
    }
  }

  fn failing( content : impl Into< String >, fail_first_n : usize ) -> Self
  {
    Self { fail_first_n, ..Self::new( content ) }
  }

  #[ must_use ]
  fn with_delay( mut self, delay : Duration ) -> Self
  {
    self.delay = delay;
    self
  }

  fn call_count( &self ) -> usize
  {
    *self.calls.lock().expect( "stub mutex poisoned" )
  }

  fn max_in_flight( &self ) -> usize
  {
    self.max_in_flight.load( Ordering::SeqCst )
  }
}

impl Transport for StubTransport
{
  async fn send( &self, _body : &ChatRequest, _environment : &dyn Environment ) -> Result< ChatResponse >
  {
    let attempt =
    {
      let mut calls = self.calls.lock().expect( "stub mutex poisoned" );
      *calls += 1;
      *calls
    };

    if attempt <= self.fail_first_n
    {
      return Err( CoreError::Transient( "stub: simulated upstream failure".to_string() ).into() );
    }

    let concurrent = self.in_flight.fetch_add( 1, Ordering::SeqCst ) + 1;
    self.max_in_flight.fetch_max( concurrent, Ordering::SeqCst );

    if !self.delay.is_zero()
    {
      tokio::time::sleep( self.delay ).await;
    }

    self.in_flight.fetch_sub( 1, Ordering::SeqCst );

    Ok( ChatResponse
    {
      model : "stub-model".to_string(),
      choices : vec!
      [
        ChatChoice
        {
          message : ChatResponseMessage { content : Some( self.success_content.clone() ), tool_calls : None },
          finish_reason : Some( "stop".to_string() ),
        }
      ],
      usage : Usage { prompt_tokens : 12, completion_tokens : 34, total_tokens : 46 },
    } )
  }
}

fn build_orchestrator( transport : Arc< dyn Transport > ) -> Orchestrator< NullStore >
{
  let environment = Arc::new( EnvironmentImpl::new( Secret::new( "test-key".to_string() ).unwrap() ).unwrap() );
  let breaker = CircuitBreaker::new( CircuitBreakerConfig::default() );
  let retry = RetryConfig::default();
  let client = ModelClient::new( environment, transport, breaker, retry );

  Orchestrator::new( client, NullStore::new() )
}

fn test_orchestrator() -> Orchestrator< NullStore >
{
  build_orchestrator( Arc::new( StubTransport::new( HAPPY_CONTENT ) ) )
}

#[ tokio::test ]
async fn empty_prompt_fails_validation_without_touching_the_network()
{
  let orchestrator = test_orchestrator();
  let request = PromptRequest::new( "", Category::Creative );

  let record = orchestrator.optimize( request ).await;

  assert!( !record.is_complete() );
  assert!( record.deconstruction.is_none() );
  assert!( !record.errors.is_empty() );
}

#[ tokio::test ]
async fn whitespace_only_prompt_fails_validation()
{
  let orchestrator = test_orchestrator();
  let request = PromptRequest::new( "     ", Category::Technical );

  let record = orchestrator.optimize( request ).await;

  assert!( !record.is_complete() );
  assert!( record.errors.iter().any( |e| e.contains( "whitespace" ) ) );
}

#[ tokio::test ]
async fn over_length_prompt_fails_validation()
{
  let orchestrator = test_orchestrator();
  let too_long = "a".repeat( 10_001 );
  let request = PromptRequest::new( too_long, Category::Creative );

  let record = orchestrator.optimize( request ).await;

  assert!( !record.is_complete() );
  assert!( record.errors.iter().any( |e| e.contains( "10,000" ) || e.contains( "10000" ) ) );
}

#[ tokio::test ]
async fn validation_failure_still_persists_a_session_to_the_store()
{
  let orchestrator = test_orchestrator();
  let request = PromptRequest::new( "", Category::Marketing );

  orchestrator.optimize( request ).await;

  assert_eq!( orchestrator.store().session_count(), 1 );
}

#[ tokio::test ]
async fn build_agent_category_dispatches_in_parallel_mode()
{
  let orchestrator = test_orchestrator();
  // A build_agent request fails validation (empty) before any stage runs,
  // but the record still carries the dispatch mode chosen up front.
  let request = PromptRequest::new( "", Category::BuildAgent );

  let record = orchestrator.optimize( request ).await;

  assert_eq!( record.workflow_mode, DispatchMode::Parallel );
}

#[ tokio::test ]
async fn short_creative_prompt_dispatches_sequentially()
{
  let orchestrator = test_orchestrator();
  let request = PromptRequest::new( "", Category::Creative );

  let record = orchestrator.optimize( request ).await;

  assert_eq!( record.workflow_mode, DispatchMode::Sequential );
}

#[ test ]
fn cost_ledger_starts_empty()
{
  let orchestrator = test_orchestrator();
  let summary = orchestrator.cost_ledger().summary( None, None );
  assert_eq!( summary.call_count, 0 );
}

#[ test ]
fn cache_stats_start_empty()
{
  let orchestrator = test_orchestrator();
  let stats = orchestrator.cache_stats();
  assert_eq!( stats.len, 0 );
  assert_eq!( stats.hits, 0 );
  assert_eq!( stats.misses, 0 );
}

#[ tokio::test ]
async fn happy_path_completes_with_the_evaluators_extracted_score()
{
  let stub = Arc::new( StubTransport::new( HAPPY_CONTENT ) );
  let orchestrator = build_orchestrator( Arc::clone( &stub ) as Arc< dyn Transport > );
  let request = PromptRequest::new( "explain recursion to me", Category::Educational );

  let record = orchestrator.optimize( request ).await;

  assert!( record.is_complete() );
  assert_eq!( record.workflow_mode, DispatchMode::Sequential );
  assert_eq!( record.quality_score, Some( 85 ) );
  assert!( record.errors.is_empty() );
  assert!( record.optimized_prompt.unwrap().contains( "recursion" ) );
  // Deconstruct, Diagnose, Design, Sample, Evaluate: one call each.
  assert_eq!( stub.call_count(), 5 );
}

#[ tokio::test ]
async fn build_agent_category_runs_deconstruct_and_preliminary_diagnose_concurrently()
{
  let stub = Arc::new( StubTransport::new( HAPPY_CONTENT ).with_delay( Duration::from_millis( 20 ) ) );
  let orchestrator = build_orchestrator( Arc::clone( &stub ) as Arc< dyn Transport > );
  let request = PromptRequest::new( "design a multi-step build agent workflow", Category::BuildAgent );

  let record = orchestrator.optimize( request ).await;

  assert_eq!( record.workflow_mode, DispatchMode::Parallel );
  assert!( record.is_complete() );
  assert!( stub.max_in_flight() >= 2, "deconstruct and the preliminary diagnose should overlap in the parallel branch" );
}

#[ tokio::test ]
async fn persistent_upstream_failures_open_the_circuit_after_five_failures()
{
  let stub = Arc::new( StubTransport::failing( HAPPY_CONTENT, usize::MAX ) );
  let orchestrator = build_orchestrator( Arc::clone( &stub ) as Arc< dyn Transport > );

  let first = orchestrator.optimize( PromptRequest::new( "a first prompt to optimize", Category::Creative ) ).await;
  assert!( !first.is_complete() );
  assert_eq!( orchestrator.client().circuit_state(), CircuitState::Closed );

  let second = orchestrator.optimize( PromptRequest::new( "a second prompt to optimize", Category::Creative ) ).await;

  assert!( !second.is_complete() );
  assert_eq!( orchestrator.client().circuit_state(), CircuitState::Open );
  assert!( second.errors.iter().any( |e| e.contains( "Circuit Breaker Open" ) ) );
  // 3 retry attempts exhaust the first request; the second opens the
  // breaker on its 2nd attempt (5 counted failures total), so its 3rd
  // attempt never reaches the transport.
  assert_eq!( stub.call_count(), 5 );
}

#[ tokio::test ]
async fn missing_parseable_score_falls_back_to_the_default_with_a_warning()
{
  let stub = Arc::new( StubTransport::new( NO_SCORE_CONTENT ) );
  let orchestrator = build_orchestrator( Arc::clone( &stub ) as Arc< dyn Transport > );
  let request = PromptRequest::new( "write a product description", Category::Marketing );

  let record = orchestrator.optimize( request ).await;

  assert_eq!( record.quality_score, Some( 75 ) );
  assert!( record.errors.iter().any( |e| e.contains( "quality_score defaulted" ) ) );
}

#[ tokio::test ]
async fn forbidden_identity_tokens_are_sanitized_out_of_every_persona_enforced_stage()
{
  let stub = Arc::new( StubTransport::new( PERSONA_LEAK_CONTENT ) );
  let orchestrator = build_orchestrator( Arc::clone( &stub ) as Arc< dyn Transport > );
  let request = PromptRequest::new( "write a short poem about the sea", Category::Creative );

  let record = orchestrator.optimize( request ).await;

  assert!( record.is_complete() );

  // Every persona-enforced stage is sanitized; the Sample stage is not
  // persona-enforced (it runs the redesigned prompt itself, not a role),
  // so it is deliberately excluded here.
  for field in [ &record.deconstruction, &record.diagnosis, &record.optimized_prompt, &record.evaluation ]
  {
    let text = field.as_ref().expect( "stage completed" ).to_lowercase();
    assert!( !text.contains( "grok" ), "persona leak survived sanitisation: {text}" );
    assert!( !text.contains( "xai" ), "persona leak survived sanitisation: {text}" );
  }
}
