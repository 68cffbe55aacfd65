mod private
{
  use std::sync::Arc;

  use crate::config::Category;
  use crate::model_client::{ CompletionRequest, ModelClient };
  use crate::record::RoleOutput;
  use crate::roles::{ category_context, RoleTable };

  /// Builds the completion request for a full Diagnose call (§4.4, §8 cache
  /// idempotence).
  #[ must_use ]
  pub fn build_request( roles : &RoleTable, raw_prompt : &str, deconstruction : &str, category : Category ) -> CompletionRequest
  {
    let system_prompt = format!( "{}\n\n{}", roles.diagnoser.system_prompt, category_context( category ) );
    let user_content = format!(
      "Original Prompt:\n{raw_prompt}\n\nDeconstruction:\n{deconstruction}\n\nIdentify all issues and weaknesses in this prompt. Be specific and actionable."
    );

    CompletionRequest
    {
      system_prompt,
      user_content,
      temperature : roles.diagnoser.temperature,
      max_tokens : roles.diagnoser.max_tokens,
      tools : None,
      tool_resolver : None::< Arc< dyn crate::model_client::ToolResolver > >,
      enforce_persona : true,
    }
  }

  /// Full diagnosis: weaknesses and ambiguities in `raw_prompt` given its
  /// `deconstruction` (§4.7). Run strictly after Deconstruct.
  pub async fn run( client : &ModelClient, roles : &RoleTable, raw_prompt : &str, deconstruction : &str, category : Category ) -> RoleOutput
  {
    client.complete( &build_request( roles, raw_prompt, deconstruction, category ) ).await
  }

  /// Quick, uncached preliminary pass, run only alongside Deconstruct in the
  /// parallel dispatch branch (§4.7, §4.9). Discarded if Deconstruct fails.
  pub async fn run_preliminary( client : &ModelClient, roles : &RoleTable, raw_prompt : &str, category : Category ) -> RoleOutput
  {
    let system_prompt = format!( "{}\n\n{}", roles.diagnoser_preliminary.system_prompt, category_context( category ) );
    let user_content = format!( "Quick preliminary analysis of this prompt:\n\n{raw_prompt}" );

    let request = CompletionRequest
    {
      system_prompt,
      user_content,
      temperature : roles.diagnoser_preliminary.temperature,
      max_tokens : roles.diagnoser_preliminary.max_tokens,
      tools : None,
      tool_resolver : None::< Arc< dyn crate::model_client::ToolResolver > >,
      enforce_persona : true,
    };

    client.complete( &request ).await
  }
}

crate::mod_interface!
{
  exposed use
  {
    build_request,
    run,
    run_preliminary,
  };
}
