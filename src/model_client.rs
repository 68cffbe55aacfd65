mod private
{
  use std::sync::Arc;
  use std::time::Instant;

  use crate::chat::{ ChatMessage, ChatRequest, ToolCall, ToolDefinition, Usage };
  use crate::circuit_breaker::CircuitBreaker;
  use crate::environment::Environment;
  use crate::error::{ CoreError, Result };
  use crate::persona::{ build_system_prompt, sanitize_persona_content };
  use crate::pool::Transport;
  use crate::record::RoleOutput;
  use crate::retry::RetryConfig;

  /// Resolves a single tool call to its result text. Registered per
  /// `CompletionRequest`; a name the resolver does not recognise is reported
  /// as `None`, which the client surfaces as `CoreError::Parse` rather than
  /// echoing a fabricated "executed" result.
  pub trait ToolResolver : Send + Sync
  {
    /// Attempts to resolve `call`, returning the tool's result text.
    fn resolve( &self, call : &ToolCall ) -> Option< String >;
  }

  /// One chat-completion call: system/user content, sampling parameters, and
  /// any tools to advertise (§4.1, §6).
  #[ derive( Clone ) ]
  pub struct CompletionRequest
  {
    /// Role-specific system prompt, before persona enforcement.
    pub system_prompt : String,
    /// The user-facing message content.
    pub user_content : String,
    /// Sampling temperature.
    pub temperature : f32,
    /// Maximum completion tokens.
    pub max_tokens : u32,
    /// Tool definitions to advertise, if any.
    pub tools : Option< Vec< ToolDefinition > >,
    /// Handler for any tool calls the model makes; `None` means any tool
    /// call the model attempts is unknown.
    pub tool_resolver : Option< Arc< dyn ToolResolver > >,
    /// Whether the persona envelope is applied to this call.
    pub enforce_persona : bool,
  }

  /// Calls the upstream chat-completion endpoint through the connection pool,
  /// circuit breaker and retry executor, resolving at most one tool-call
  /// round-trip (§4.1, §4.2, §4.3, §4.6).
  ///
  /// Unknown tool calls (no registered handler) surface as `CoreError::Parse`
  /// rather than being echoed back as an executed result.
  pub struct ModelClient
  {
    environment : Arc< dyn Environment >,
    transport : Arc< dyn Transport >,
    breaker : CircuitBreaker,
    retry : RetryConfig,
  }

  impl ModelClient
  {
    /// Assembles a client from its already-constructed collaborators. Generic
    /// over `Transport` rather than tied to `ConnectionPool`, so tests can
    /// supply a stub upstream implementing the same trait the real pool does
    /// (§2a, §8).
    #[ must_use ]
    pub fn new( environment : Arc< dyn Environment >, transport : Arc< dyn Transport >, breaker : CircuitBreaker, retry : RetryConfig ) -> Self
    {
      Self { environment, transport, breaker, retry }
    }

    /// Current breaker state, for the readiness probe (§4.11) and the
    /// `circuit_state` metrics gauge.
    #[ must_use ]
    pub fn circuit_state( &self ) -> crate::circuit_breaker::CircuitState
    {
      self.breaker.state()
    }

    /// Available connection-pool permits, for the `open_connections` gauge.
    #[ must_use ]
    pub fn available_permits( &self ) -> usize
    {
      self.transport.available_permits()
    }

    /// Runs one completion, through the breaker and retry executor, and
    /// returns a `RoleOutput` that never panics regardless of upstream
    /// failure mode.
    pub async fn complete( &self, request : &CompletionRequest ) -> RoleOutput
    {
      let started = Instant::now();

      let outcome = self.retry.call( || self.breaker.call( || self.call_once( request ) ) ).await;

      let duration_ms = u64::try_from( started.elapsed().as_millis() ).unwrap_or( u64::MAX );

      match outcome
      {
        Ok( ( content, usage, model ) ) =>
        {
          let sanitized = if request.enforce_persona { sanitize_persona_content( &content ) } else { content };
          RoleOutput::success( sanitized, usage.total_tokens, model, duration_ms )
        }
        Err( err ) => RoleOutput::failure( err.to_string(), duration_ms ),
      }
    }

    async fn call_once( &self, request : &CompletionRequest ) -> Result< ( String, Usage, String ) >
    {
      let system_prompt = build_system_prompt( &request.system_prompt, request.enforce_persona );

      let mut messages = vec!
      [
        ChatMessage::system( system_prompt ),
        ChatMessage::user( request.user_content.clone() ),
      ];

      let body = ChatRequest
      {
        model : self.environment.model().to_string(),
        messages : messages.clone(),
        temperature : request.temperature,
        max_tokens : request.max_tokens,
        tools : request.tools.clone(),
        tool_choice : request.tools.as_ref().map( |_| "auto".to_string() ),
      };

      let response = self.send( &body ).await?;
      let choice = response.choices.into_iter().next()
        .ok_or_else( || CoreError::Parse( "upstream returned no choices".to_string() ) )?;

      let Some( tool_calls ) = choice.message.tool_calls.filter( |calls| !calls.is_empty() ) else
      {
        let content = choice.message.content.unwrap_or_default();
        return Ok( ( content, response.usage, response.model ) );
      };

      // One resolution leg: unknown tools fail closed rather than echoing a
      // fabricated "executed" result back to the model.
      messages.push( ChatMessage::assistant_tool_calls( choice.message.content, tool_calls.clone() ) );

      for call in &tool_calls
      {
        let resolved = request.tool_resolver.as_ref().and_then( |resolver| resolver.resolve( call ) );
        match resolved
        {
          Some( result ) => messages.push( ChatMessage::tool_result( call.id.clone(), result ) ),
          None => return Err( CoreError::Parse( format!( "unknown tool call: {}", call.function.name ) ).into() ),
        }
      }

      let follow_up = ChatRequest
      {
        model : self.environment.model().to_string(),
        messages,
        temperature : request.temperature,
        max_tokens : request.max_tokens,
        tools : request.tools.clone(),
        tool_choice : request.tools.as_ref().map( |_| "auto".to_string() ),
      };

      let second = self.send( &follow_up ).await?;
      let second_choice = second.choices.into_iter().next()
        .ok_or_else( || CoreError::Parse( "upstream returned no choices on resolution leg".to_string() ) )?;

      let content = second_choice.message.content.unwrap_or_default();
      let combined_usage = response.usage + second.usage;
      Ok( ( content, combined_usage, second.model ) )
    }

    async fn send( &self, body : &ChatRequest ) -> Result< crate::chat::ChatResponse >
    {
      self.transport.send( body, self.environment.as_ref() ).await
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    ToolResolver,
    CompletionRequest,
    ModelClient,
  };
}
