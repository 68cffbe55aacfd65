mod private
{
  use std::time::Duration;
  use crate::error::{ CoreError, Result };
  use tokio::time::sleep;

  /// Bounded exponential backoff with jitter around any fallible async call
  /// (§4.6).
  #[ derive( Debug, Clone ) ]
  pub struct RetryConfig
  {
    /// Total attempts permitted, including the first (the attempt budget).
    pub max_attempts : usize,
    /// Delay before the first retry.
    pub initial_delay : Duration,
    /// Exponential growth factor applied per subsequent attempt.
    pub multiplier : f64,
    /// Upper bound on any single delay, before jitter.
    pub max_delay : Duration,
    /// Whether to scale the delay by a `uniform(0.5, 1.0)` jitter factor.
    pub use_jitter : bool,
  }

  impl Default for RetryConfig
  {
    fn default() -> Self
    {
      Self
      {
        max_attempts : 3,
        initial_delay : Duration::from_millis( 100 ),
        multiplier : 2.0,
        max_delay : Duration::from_secs( 30 ),
        use_jitter : true,
      }
    }
  }

  impl RetryConfig
  {
    /// Constructs a config with a fixed attempt budget and the standard
    /// backoff shape from §4.6, used for the Sample/Evaluate stages
    /// (`max_attempts=2`, §4.9).
    #[ must_use ]
    pub fn with_max_attempts( attempts : usize ) -> Self
    {
      Self { max_attempts : attempts, ..Self::default() }
    }

    /// Computes `min(initial_delay * multiplier^i, max_delay) * uniform(0.5, 1.0)`
    /// for zero-indexed attempt `i` (§4.6).
    #[ must_use ]
    pub fn delay_for_attempt( &self, attempt : usize ) -> Duration
    {
      let exponential = self.initial_delay.as_secs_f64() * self.multiplier.powi( i32::try_from( attempt ).unwrap_or( i32::MAX ) );
      let capped = exponential.min( self.max_delay.as_secs_f64() );

      let jittered = if self.use_jitter
      {
        capped * ( 0.5 + 0.5 * fastrand::f64() )
      }
      else
      {
        capped
      };

      Duration::from_secs_f64( jittered.max( 0.0 ) )
    }

    /// Runs `f`, retrying on `CoreError` variants that report themselves
    /// retryable via `is_retryable`, up to `max_attempts` total attempts.
    /// Non-retryable failures bubble immediately. Every intermediate failure
    /// is logged with its attempt index; the final failure is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the last error once `max_attempts` is exhausted, or
    /// immediately on a non-retryable error.
    pub async fn call< F, Fut, T >( &self, mut f : F ) -> Result< T >
    where
      F : FnMut() -> Fut,
      Fut : std::future::Future< Output = Result< T > >,
    {
      let mut attempt = 0usize;

      loop
      {
        match f().await
        {
          Ok( value ) => return Ok( value ),
          Err( err ) =>
          {
            attempt += 1;

            let retryable = match err.downcast_ref::< CoreError >()
            {
              Some( core_err ) => core_err.is_retryable(),
              None => false,
            };

            if !retryable || attempt >= self.max_attempts
            {
              return Err( err );
            }

            #[ cfg( feature = "structured_logging" ) ]
            tracing::warn!( attempt, error = %err, "retrying after transient failure" );

            sleep( self.delay_for_attempt( attempt - 1 ) ).await;
          }
        }
      }
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    RetryConfig,
  };
}
