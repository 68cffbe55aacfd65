mod private
{
  use serde::{ Serialize, Deserialize };

  /// Token usage for a single chat-completion call.
  #[ derive( Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default ) ]
  pub struct Usage
  {
    /// Input tokens.
    pub prompt_tokens : u32,
    /// Output tokens.
    pub completion_tokens : u32,
    /// `prompt_tokens + completion_tokens`.
    pub total_tokens : u32,
  }

  impl std::ops::Add for Usage
  {
    type Output = Usage;

    fn add( self, rhs : Usage ) -> Usage
    {
      Usage
      {
        prompt_tokens : self.prompt_tokens + rhs.prompt_tokens,
        completion_tokens : self.completion_tokens + rhs.completion_tokens,
        total_tokens : self.total_tokens + rhs.total_tokens,
      }
    }
  }

  /// Message role in a chat-completion conversation (§6).
  #[ derive( Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq ) ]
  #[ serde( rename_all = "lowercase" ) ]
  pub enum Role
  {
    /// System instructions and persona/context.
    System,
    /// User query or prompt.
    User,
    /// Assistant response.
    Assistant,
    /// Tool execution result.
    Tool,
  }

  /// One message in the `messages` array sent to the upstream endpoint.
  #[ derive( Debug, Serialize, Deserialize, Clone ) ]
  pub struct ChatMessage
  {
    /// The message's role.
    pub role : Role,
    /// The message text. `None` for an assistant message that only carries
    /// tool calls.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub content : Option< String >,
    /// Tool calls the assistant requested, present only on assistant messages.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub tool_calls : Option< Vec< ToolCall > >,
    /// The id of the tool call this message answers, present only on tool
    /// messages.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub tool_call_id : Option< String >,
  }

  impl ChatMessage
  {
    /// Constructs a system message.
    #[ must_use ]
    pub fn system( content : impl Into< String > ) -> Self
    {
      Self { role : Role::System, content : Some( content.into() ), tool_calls : None, tool_call_id : None }
    }

    /// Constructs a user message.
    #[ must_use ]
    pub fn user( content : impl Into< String > ) -> Self
    {
      Self { role : Role::User, content : Some( content.into() ), tool_calls : None, tool_call_id : None }
    }

    /// Constructs the assistant message that carries the original tool-call
    /// request, to be replayed on the resolution leg.
    #[ must_use ]
    pub fn assistant_tool_calls( content : Option< String >, tool_calls : Vec< ToolCall > ) -> Self
    {
      Self { role : Role::Assistant, content, tool_calls : Some( tool_calls ), tool_call_id : None }
    }

    /// Constructs a synthetic tool-result message answering `tool_call_id`.
    #[ must_use ]
    pub fn tool_result( tool_call_id : impl Into< String >, content : impl Into< String > ) -> Self
    {
      Self { role : Role::Tool, content : Some( content.into() ), tool_calls : None, tool_call_id : Some( tool_call_id.into() ) }
    }
  }

  /// A single tool invocation requested by the model.
  #[ derive( Debug, Serialize, Deserialize, Clone ) ]
  pub struct ToolCall
  {
    /// Opaque id the resolution leg must echo back as `tool_call_id`.
    pub id : String,
    /// Always `"function"` for chat-completion tool calls.
    #[ serde( rename = "type" ) ]
    pub kind : String,
    /// The invoked function's name and arguments.
    pub function : ToolCallFunction,
  }

  /// The `function` payload of a `ToolCall`.
  #[ derive( Debug, Serialize, Deserialize, Clone ) ]
  pub struct ToolCallFunction
  {
    /// Function name, e.g. `"file_search"`.
    pub name : String,
    /// JSON-encoded arguments, as returned by the upstream (not re-parsed
    /// unless a registered handler needs a specific field).
    pub arguments : String,
  }

  /// A tool definition advertised to the model via the `tools` request field.
  #[ derive( Debug, Serialize, Deserialize, Clone ) ]
  pub struct ToolDefinition
  {
    /// Always `"function"`.
    #[ serde( rename = "type" ) ]
    pub kind : String,
    /// The function's JSON-schema-shaped definition.
    pub function : ToolFunctionDef,
  }

  /// The `function` payload of a `ToolDefinition`.
  #[ derive( Debug, Serialize, Deserialize, Clone ) ]
  pub struct ToolFunctionDef
  {
    /// Function name the model may invoke.
    pub name : String,
    /// Human-readable description shown to the model.
    pub description : String,
    /// JSON-schema object describing accepted arguments.
    pub parameters : serde_json::Value,
  }

  /// Request body for `POST {base}/chat/completions` (§6).
  #[ derive( Debug, Serialize, Clone ) ]
  pub struct ChatRequest
  {
    /// Model name to invoke.
    pub model : String,
    /// Ordered message list.
    pub messages : Vec< ChatMessage >,
    /// Sampling temperature.
    pub temperature : f32,
    /// Maximum completion tokens.
    pub max_tokens : u32,
    /// Tool definitions offered to the model, if any.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub tools : Option< Vec< ToolDefinition > >,
    /// Tool-choice strategy (`"auto"` when `tools` is present).
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub tool_choice : Option< String >,
  }

  /// Response body from `POST {base}/chat/completions`.
  #[ derive( Debug, Deserialize, Clone ) ]
  pub struct ChatResponse
  {
    /// The model that actually served the call (may differ from the request).
    pub model : String,
    /// One choice per `n` requested; this client always requests one.
    pub choices : Vec< ChatChoice >,
    /// Token accounting for this call.
    #[ serde( default ) ]
    pub usage : Usage,
  }

  /// A single entry of `ChatResponse::choices`.
  #[ derive( Debug, Deserialize, Clone ) ]
  pub struct ChatChoice
  {
    /// The model's message.
    pub message : ChatResponseMessage,
    /// Why generation stopped (`"stop"`, `"tool_calls"`, …).
    #[ serde( default ) ]
    pub finish_reason : Option< String >,
  }

  /// The `message` field of a response choice.
  #[ derive( Debug, Deserialize, Clone ) ]
  pub struct ChatResponseMessage
  {
    /// Response text, absent when the turn only carries tool calls.
    #[ serde( default ) ]
    pub content : Option< String >,
    /// Tool calls requested by the model, if any.
    #[ serde( default ) ]
    pub tool_calls : Option< Vec< ToolCall > >,
  }
}

crate::mod_interface!
{
  exposed use
  {
    Usage,
    Role,
    ChatMessage,
    ToolCall,
    ToolCallFunction,
    ToolDefinition,
    ToolFunctionDef,
    ChatRequest,
    ChatResponse,
    ChatChoice,
    ChatResponseMessage,
  };
}
