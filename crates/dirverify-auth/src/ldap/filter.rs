//! Search filter construction
//!
//! Clauses are emitted as `attribute=value` and joined with `,`. The joining
//! is literal: no `(&...)` or `(|...)` combinators are added, so a filter with
//! more than one clause is read by the server as a single equality whose value
//! contains the remaining clauses. Values are escaped (RFC 4515) so user input
//! cannot inject filter syntax.

use dirverify_core::{Error, Result, SearchParameter};
use ldap3::ldap_escape;
use std::collections::HashMap;

/// Separator placed between filter clauses
pub const CLAUSE_SEPARATOR: &str = ",";

/// Build the search filter from configured parameters and call inputs
pub fn build_filter(parameters: &[SearchParameter], inputs: &HashMap<&str, &str>) -> Result<String> {
    if parameters.is_empty() {
        return Err(Error::MissingConfiguration("search_parameters"));
    }

    let clauses = parameters
        .iter()
        .map(|parameter| -> Result<String> {
            let value = inputs
                .get(parameter.input.as_str())
                .ok_or_else(|| Error::MissingSearchInput {
                    attribute: parameter.attribute.clone(),
                    input: parameter.input.clone(),
                })?;
            Ok(format!("{}={}", parameter.attribute, ldap_escape(*value)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(clauses.join(CLAUSE_SEPARATOR))
}
