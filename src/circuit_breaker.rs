mod private
{
  use crate::error::{ CoreError, Result };
  use std::sync::Mutex;
  use std::time::{ Duration, Instant };
  use std::future::Future;

  /// The three states of the breaker (§3, §4.3).
  #[ derive( Debug, Clone, Copy, PartialEq, Eq ) ]
  pub enum CircuitState
  {
    /// Calls pass through.
    Closed,
    /// Calls are rejected immediately until `open_timeout` elapses.
    Open,
    /// A single probe call is admitted at a time.
    HalfOpen,
  }

  /// Tunable breaker parameters. Defaults match §4.3 exactly: 5 failures to
  /// open, 2 successes to close, 60s open timeout.
  #[ derive( Debug, Clone ) ]
  pub struct CircuitBreakerConfig
  {
    /// Consecutive counted failures before transitioning Closed -> Open.
    pub failure_threshold : usize,
    /// Consecutive successes in HalfOpen before transitioning to Closed.
    pub success_threshold : usize,
    /// How long the breaker stays Open before admitting a HalfOpen probe.
    pub open_timeout : Duration,
  }

  impl Default for CircuitBreakerConfig
  {
    fn default() -> Self
    {
      Self
      {
        failure_threshold : 5,
        success_threshold : 2,
        open_timeout : Duration::from_secs( 60 ),
      }
    }
  }

  #[ derive( Debug ) ]
  struct CircuitBreakerState
  {
    state : CircuitState,
    fail_count : usize,
    succ_count : usize,
    last_failure_at : Option< Instant >,
  }

  /// Closed/Open/HalfOpen protection around the Model Client (§4.3).
  /// Transitions are guarded by a single mutex so concurrent callers observe
  /// a consistent state.
  #[ derive( Debug ) ]
  pub struct CircuitBreaker
  {
    config : CircuitBreakerConfig,
    state : Mutex< CircuitBreakerState >,
  }

  impl CircuitBreaker
  {
    /// Constructs a breaker in the Closed state.
    #[ must_use ]
    pub fn new( config : CircuitBreakerConfig ) -> Self
    {
      Self
      {
        config,
        state : Mutex::new( CircuitBreakerState
        {
          state : CircuitState::Closed,
          fail_count : 0,
          succ_count : 0,
          last_failure_at : None,
        } ),
      }
    }

    /// Current state, after lazily applying an Open -> HalfOpen transition if
    /// `open_timeout` has elapsed.
    #[ must_use ]
    pub fn state( &self ) -> CircuitState
    {
      let mut guard = self.state.lock().expect( "circuit breaker mutex poisoned" );
      self.maybe_transition_to_half_open( &mut guard );
      guard.state
    }

    fn maybe_transition_to_half_open( &self, guard : &mut CircuitBreakerState )
    {
      if guard.state == CircuitState::Open
      {
        let elapsed = guard.last_failure_at.map_or( Duration::MAX, |t| t.elapsed() );
        if elapsed >= self.config.open_timeout
        {
          guard.state = CircuitState::HalfOpen;
          guard.succ_count = 0;
        }
      }
    }

    /// Seconds remaining before an Open breaker admits a probe; zero once
    /// eligible.
    #[ must_use ]
    pub fn remaining_timeout_secs( &self ) -> f64
    {
      let guard = self.state.lock().expect( "circuit breaker mutex poisoned" );
      match guard.last_failure_at
      {
        Some( t ) => ( self.config.open_timeout.saturating_sub( t.elapsed() ) ).as_secs_f64(),
        None => 0.0,
      }
    }

    fn record_success( &self )
    {
      let mut guard = self.state.lock().expect( "circuit breaker mutex poisoned" );
      guard.fail_count = 0;

      if guard.state == CircuitState::HalfOpen
      {
        guard.succ_count += 1;
        if guard.succ_count >= self.config.success_threshold
        {
          guard.state = CircuitState::Closed;
          guard.succ_count = 0;
        }
      }
    }

    fn record_failure( &self )
    {
      let mut guard = self.state.lock().expect( "circuit breaker mutex poisoned" );
      guard.last_failure_at = Some( Instant::now() );

      if guard.state == CircuitState::HalfOpen
      {
        guard.state = CircuitState::Open;
        guard.fail_count = 0;
        return;
      }

      guard.fail_count += 1;
      if guard.fail_count >= self.config.failure_threshold
      {
        guard.state = CircuitState::Open;
      }
    }

    /// Manually resets the breaker to Closed with zeroed counters.
    pub fn reset( &self )
    {
      let mut guard = self.state.lock().expect( "circuit breaker mutex poisoned" );
      guard.state = CircuitState::Closed;
      guard.fail_count = 0;
      guard.succ_count = 0;
      guard.last_failure_at = None;
    }

    /// Executes `f` through the breaker. Rejects immediately with
    /// `CoreError::OpenCircuit` while Open; otherwise runs `f`, classifying
    /// the result via `CoreError::is_retryable` to decide whether it counts
    /// as a breaker failure (validation failures do not affect the breaker).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OpenCircuit` while the breaker is open, or
    /// whatever error `f` produces.
    pub async fn call< F, Fut, T >( &self, f : F ) -> Result< T >
    where
      F : FnOnce() -> Fut,
      Fut : Future< Output = Result< T > >,
    {
      {
        let mut guard = self.state.lock().expect( "circuit breaker mutex poisoned" );
        self.maybe_transition_to_half_open( &mut guard );
        if guard.state == CircuitState::Open
        {
          return Err( CoreError::OpenCircuit
          {
            retry_after_secs : guard.last_failure_at
              .map_or( 0.0, |t| self.config.open_timeout.saturating_sub( t.elapsed() ).as_secs_f64() ),
          }.into() );
        }
      }

      match f().await
      {
        Ok( value ) =>
        {
          self.record_success();
          Ok( value )
        }
        Err( err ) =>
        {
          let counted = match err.downcast_ref::< CoreError >()
          {
            Some( core_err ) => core_err.is_retryable(),
            None => true,
          };
          if counted
          {
            self.record_failure();
          }
          Err( err )
        }
      }
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    CircuitState,
    CircuitBreakerConfig,
    CircuitBreaker,
  };
}
