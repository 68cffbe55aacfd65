mod private
{
  use std::sync::Arc;

  use crate::config::Category;
  use crate::model_client::{ CompletionRequest, ModelClient };
  use crate::record::RoleOutput;
  use crate::roles::{ category_context, RoleTable };

  /// Builds the completion request for a Deconstruct call, without sending
  /// it. Exposed so the Orchestrator can fingerprint the exact content for
  /// the response cache (§4.4, §8 cache idempotence).
  #[ must_use ]
  pub fn build_request( roles : &RoleTable, raw_prompt : &str, category : Category ) -> CompletionRequest
  {
    let system_prompt = format!( "{}\n\n{}", roles.deconstructor.system_prompt, category_context( category ) );
    let user_content = format!( "Deconstruct the following prompt:\n\n{raw_prompt}" );

    CompletionRequest
    {
      system_prompt,
      user_content,
      temperature : roles.deconstructor.temperature,
      max_tokens : roles.deconstructor.max_tokens,
      tools : None,
      tool_resolver : None::< Arc< dyn crate::model_client::ToolResolver > >,
      enforce_persona : true,
    }
  }

  /// Breaks `raw_prompt` into intent, entities, desired output format, and
  /// missing context (§4.7).
  pub async fn run( client : &ModelClient, roles : &RoleTable, raw_prompt : &str, category : Category ) -> RoleOutput
  {
    client.complete( &build_request( roles, raw_prompt, category ) ).await
  }
}

crate::mod_interface!
{
  exposed use
  {
    build_request,
    run,
  };
}
