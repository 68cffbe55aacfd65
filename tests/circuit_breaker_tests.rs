//! Tests for the circuit breaker's Closed/Open/HalfOpen transitions.
//!
//! The public surface only exposes state transitions through `call()`, so
//! every test drives the breaker with closures returning `Ok`/`Err` rather
//! than poking failure/success counters directly.

#![ cfg( feature = "circuit_breaker" ) ]

use std::time::Duration;
use promptforge_core::circuit_breaker::{ CircuitBreaker, CircuitBreakerConfig, CircuitState };
use promptforge_core::error::{ CoreError, Result };

fn fast_config() -> CircuitBreakerConfig
{
  CircuitBreakerConfig
  {
    failure_threshold : 3,
    success_threshold : 2,
    open_timeout : Duration::from_millis( 50 ),
  }
}

#[ tokio::test ]
async fn starts_closed()
{
  let breaker = CircuitBreaker::new( CircuitBreakerConfig::default() );
  assert_eq!( breaker.state(), CircuitState::Closed );
}

#[ tokio::test ]
async fn opens_after_failure_threshold()
{
  let breaker = CircuitBreaker::new( fast_config() );

  for _ in 0..3
  {
    let result = breaker.call( || async { Err::< (), _ >( CoreError::Transient( "boom".to_string() ).into() ) } ).await;
    assert!( result.is_err() );
  }

  assert_eq!( breaker.state(), CircuitState::Open );
}

#[ tokio::test ]
async fn non_retryable_errors_do_not_count_toward_the_breaker()
{
  let breaker = CircuitBreaker::new( fast_config() );

  for _ in 0..10
  {
    let result = breaker.call( || async { Err::< (), _ >( CoreError::Validation( "bad input".to_string() ).into() ) } ).await;
    assert!( result.is_err() );
  }

  assert_eq!( breaker.state(), CircuitState::Closed );
}

#[ tokio::test ]
async fn open_breaker_rejects_immediately_without_calling_f()
{
  let breaker = CircuitBreaker::new( fast_config() );

  for _ in 0..3
  {
    let _ = breaker.call( || async { Err::< (), _ >( CoreError::Transient( "boom".to_string() ).into() ) } ).await;
  }
  assert_eq!( breaker.state(), CircuitState::Open );

  let mut called = false;
  let result : Result< () > = breaker.call( ||
  {
    called = true;
    async { Ok( () ) }
  } ).await;

  assert!( result.is_err() );
  assert!( !called );

  match result.unwrap_err().downcast_ref::< CoreError >()
  {
    Some( CoreError::OpenCircuit { .. } ) => {}
    other => panic!( "expected OpenCircuit, got {other:?}" ),
  }
}

#[ tokio::test ]
async fn transitions_to_half_open_then_closed_after_timeout()
{
  let breaker = CircuitBreaker::new( fast_config() );

  for _ in 0..3
  {
    let _ = breaker.call( || async { Err::< (), _ >( CoreError::Transient( "boom".to_string() ).into() ) } ).await;
  }
  assert_eq!( breaker.state(), CircuitState::Open );

  tokio::time::sleep( Duration::from_millis( 60 ) ).await;

  // Two successful probes close the breaker (success_threshold = 2).
  let first : Result< u32 > = breaker.call( || async { Ok( 1 ) } ).await;
  assert!( first.is_ok() );
  assert_eq!( breaker.state(), CircuitState::HalfOpen );

  let second : Result< u32 > = breaker.call( || async { Ok( 2 ) } ).await;
  assert!( second.is_ok() );
  assert_eq!( breaker.state(), CircuitState::Closed );
}

#[ tokio::test ]
async fn half_open_failure_reopens_immediately()
{
  let breaker = CircuitBreaker::new( fast_config() );

  for _ in 0..3
  {
    let _ = breaker.call( || async { Err::< (), _ >( CoreError::Transient( "boom".to_string() ).into() ) } ).await;
  }
  tokio::time::sleep( Duration::from_millis( 60 ) ).await;
  assert_eq!( breaker.state(), CircuitState::HalfOpen );

  let result = breaker.call( || async { Err::< (), _ >( CoreError::Transient( "still broken".to_string() ).into() ) } ).await;
  assert!( result.is_err() );
  assert_eq!( breaker.state(), CircuitState::Open );
}

#[ tokio::test ]
async fn reset_returns_to_closed()
{
  let breaker = CircuitBreaker::new( fast_config() );

  for _ in 0..3
  {
    let _ = breaker.call( || async { Err::< (), _ >( CoreError::Transient( "boom".to_string() ).into() ) } ).await;
  }
  assert_eq!( breaker.state(), CircuitState::Open );

  breaker.reset();
  assert_eq!( breaker.state(), CircuitState::Closed );
}
