use anyhow::{anyhow, Context, Result};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

/// The semantics associated with a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum Semantics {
    /// The grounded semantics
    GR,
    /// The preferred semantics
    PR,
    /// The unchallenged semantics
    UC,
    /// The initial sets (non-empty minimal admissible sets)
    IT,
}

impl TryFrom<&str> for Semantics {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "gr" => Ok(Semantics::GR),
            "pr" => Ok(Semantics::PR),
            "uc" => Ok(Semantics::UC),
            "it" => Ok(Semantics::IT),
            _ => Err(anyhow!(r#"undefined semantics "{}""#, value)),
        }
    }
}

/// The query to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum Query {
    /// Compute a single extension
    SE,
    /// Check credulous acceptance
    DC,
    /// Check skeptical acceptance
    DS,
    /// Enumerate the extensions
    EE,
    /// Count the extensions
    CE,
}

impl Query {
    /// Returns `true` iff the query needs an argument (DC and DS queries).
    pub fn requires_argument(&self) -> bool {
        matches!(self, Query::DC | Query::DS)
    }
}

impl TryFrom<&str> for Query {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "se" => Ok(Query::SE),
            "dc" => Ok(Query::DC),
            "ds" => Ok(Query::DS),
            "ee" => Ok(Query::EE),
            "ce" => Ok(Query::CE),
            _ => Err(anyhow!(r#"undefined query "{}""#, value)),
        }
    }
}

/// Reads a string depicting a problem with an XX-YY pattern.
///
/// This functions reads a problem string following the format in ICCMA competitions.
/// The string is split at the first hyphen found in it.
/// The substring before this hyphen is considered as the query, while the substring after it is considered as the semantics.
///
/// In case there is no hyphen, an error is returned.
///
/// # Example
///
/// ```
/// # use reducto::aa::{read_problem_string, Query, Semantics};
/// assert_eq!((Query::DS, Semantics::PR), read_problem_string("DS-PR").unwrap());
/// assert!(read_problem_string("DS-ST").is_err());
/// ```
pub fn read_problem_string(problem: &str) -> Result<(Query, Semantics)> {
    let context = || format!(r#"while parsing problem string "{}""#, problem);
    match problem.find('-') {
        Some(n) => {
            let query = Query::try_from(&problem[0..n]).with_context(context)?;
            let semantics = Semantics::try_from(&problem[1 + n..]).with_context(context)?;
            Ok((query, semantics))
        }
        None => Err(anyhow!("no hyphen in problem string")).with_context(context),
    }
}

/// Iterates over the strings of the problems handled by this library.
pub fn iter_problem_strings() -> impl Iterator<Item = String> {
    Query::iter().flat_map(|q| {
        Semantics::iter().map(move |s| format!("{}-{}", q.as_ref(), s.as_ref()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_problem_ok() {
        assert_eq!(
            (Query::DS, Semantics::PR),
            read_problem_string("DS-PR").unwrap()
        );
        assert_eq!(
            (Query::EE, Semantics::UC),
            read_problem_string("ee-uc").unwrap()
        );
        assert_eq!(
            (Query::CE, Semantics::IT),
            read_problem_string("CE-IT").unwrap()
        );
    }

    #[test]
    fn test_read_problem_unknown_query() {
        assert!(read_problem_string("foo-PR").is_err());
    }

    #[test]
    fn test_read_problem_unknown_semantics() {
        assert!(read_problem_string("SE-foo").is_err());
        assert!(read_problem_string("SE-ST").is_err());
    }

    #[test]
    fn test_read_problem_no_hyphen() {
        assert!(read_problem_string("SEPR").is_err());
    }

    #[test]
    fn test_problem_strings() {
        let problems = iter_problem_strings().collect::<Vec<String>>();
        assert_eq!(20, problems.len());
        assert!(problems.contains(&"DS-PR".to_string()));
        assert!(problems.contains(&"CE-IT".to_string()));
        problems
            .iter()
            .for_each(|p| assert!(read_problem_string(p).is_ok()));
    }

    #[test]
    fn test_requires_argument() {
        assert!(Query::DC.requires_argument());
        assert!(Query::DS.requires_argument());
        assert!(!Query::SE.requires_argument());
        assert!(!Query::EE.requires_argument());
        assert!(!Query::CE.requires_argument());
    }
}
