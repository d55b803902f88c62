//! Canned YAML fragments inserted by the `paths` rewrites.

const RESPONSES: &str = "\
responses:
  '200':
    description: Successful response
    content:
      application/json:
        schema:
          type: object
          properties:
            result:
              type: object
              description: The result of the {method} request
  '400':
    description: Bad request
    content:
      application/json:
        schema:
          type: object
          properties:
            error:
              type: string
              description: Error message
  '429':
    description: Too many requests
    content:
      application/json:
        schema:
          type: object
          properties:
            error:
              type: string
              description: Rate limit exceeded message
";

/// The success / bad-request / rate-limit `responses:` block, every line
/// prefixed with `indent` and newline-terminated.
pub(crate) fn responses_block(method_name: &str, indent: &str) -> String {
    let mut out = String::with_capacity(RESPONSES.len() * 2);
    for line in RESPONSES.lines() {
        out.push_str(indent);
        out.push_str(&line.replace("{method}", method_name));
        out.push('\n');
    }
    out
}

/// A `paths:` section with a single `/` path item whose `post` operation
/// carries the canned responses.
pub(crate) fn default_paths_section(method_name: &str) -> String {
    let mut out = format!(
        "paths:
  /:
    summary: {method_name}
    post:
      summary: Retrieves {method_name} information
      operationId: {method_name}
      security:
        - ApiKeyQuery: []
"
    );
    out.push_str(&responses_block(method_name, "      "));
    out
}
