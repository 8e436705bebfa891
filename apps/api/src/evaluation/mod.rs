// Candidate evaluation: prompt, reply parsing, the per-submission pipeline
// and its HTTP handlers. The only external call goes through llm_client.

pub mod handlers;
pub mod prompts;
pub mod reply_parser;
pub mod service;
