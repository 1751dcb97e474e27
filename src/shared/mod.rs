pub mod numeric_tokens;
