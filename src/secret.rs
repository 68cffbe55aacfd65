mod private
{
  use crate::error::{ CoreError, Result };
  use secrecy::{ SecretString, ExposeSecret };
  use std::sync::atomic::{ AtomicUsize, Ordering };

  /// Global counter tracking the number of times secrets have been exposed.
  ///
  /// Used for auditing; every call to `expose_secret()` increments it.
  static EXPOSURE_COUNTER : AtomicUsize = AtomicUsize::new( 0 );

  /// Secure wrapper for the upstream API key.
  ///
  /// Wraps a `SecretString` so the raw key never appears in `Debug` output or
  /// accidental `Display` formatting.
  ///
  /// # Format
  ///
  /// No particular prefix is required — the upstream endpoint is configurable
  /// and keys are opaque bearer tokens — but an empty or whitespace-only value
  /// is rejected.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// use promptforge_core::Secret;
  ///
  /// let secret = Secret::load_from_env( "XAI_API_KEY" )?;
  /// # Ok::<(), Box< dyn std::error::Error > >(())
  /// ```
  #[ derive( Debug, Clone ) ]
  pub struct Secret( SecretString );

  impl Secret
  {
    /// Creates a new `Secret` from a string, rejecting an empty value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Environment` if the value is empty or all whitespace.
    pub fn new( key : String ) -> Result< Self >
    {
      if key.trim().is_empty()
      {
        return Err( CoreError::Environment( "API key must not be empty".to_string() ).into() );
      }
      Ok( Self( SecretString::new( key.into_boxed_str() ) ) )
    }

    /// Loads the API key from an environment variable.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Environment` if the variable is unset or empty.
    pub fn load_from_env( env_var : &str ) -> Result< Self >
    {
      let key = std::env::var( env_var )
        .map_err( |_| CoreError::Environment(
          format!( "Environment variable {env_var} not set" )
        ) )?;

      Self::new( key )
    }

    /// Exposes the secret value for use in an `Authorization` header.
    ///
    /// Each call increments the global exposure counter.
    pub fn expose_secret( &self ) -> &str
    {
      EXPOSURE_COUNTER.fetch_add( 1, Ordering::Relaxed );
      self.0.expose_secret()
    }

    /// Returns the number of times any `Secret` has been exposed in this process.
    pub fn exposure_count() -> usize
    {
      EXPOSURE_COUNTER.load( Ordering::Relaxed )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Secret,
  };
}
