mod private
{
  use std::sync::Arc;

  use crate::model_client::{ CompletionRequest, ModelClient };
  use crate::record::RoleOutput;
  use crate::roles::RoleTable;

  /// Builds the completion request for an Evaluate call (§4.4, §8 cache
  /// idempotence).
  #[ must_use ]
  pub fn build_request( roles : &RoleTable, original_prompt : &str, optimized_prompt : &str, sample_output : &str ) -> CompletionRequest
  {
    let system_prompt = roles.evaluator.system_prompt.clone();
    let user_content = format!(
      "Original Prompt:\n{original_prompt}\n\nOptimized Prompt:\n{optimized_prompt}\n\nSample Output from Optimized Prompt:\n{sample_output}\n\nEvaluate both prompts and provide detailed scores (0-100 total) for each dimension."
    );

    CompletionRequest
    {
      system_prompt,
      user_content,
      temperature : roles.evaluator.temperature,
      max_tokens : roles.evaluator.max_tokens,
      tools : None,
      tool_resolver : None::< Arc< dyn crate::model_client::ToolResolver > >,
      enforce_persona : true,
    }
  }

  /// Scores the redesigned prompt's sample output on a `[0,100]` rubric
  /// (§4.7). The numeric score itself is extracted from `content` by the
  /// Parser, not by this role.
  pub async fn run
  (
    client : &ModelClient,
    roles : &RoleTable,
    original_prompt : &str,
    optimized_prompt : &str,
    sample_output : &str,
  ) -> RoleOutput
  {
    let request = build_request( roles, original_prompt, optimized_prompt, sample_output );
    client.complete( &request ).await
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
