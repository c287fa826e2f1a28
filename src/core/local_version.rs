use crate::domain::model::DependencyDescriptor;
use crate::utils::error::{Result, UploadError};
use serde::{Deserialize, Serialize};

/// What to do when several declared dependencies match the lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// The last matching dependency in declaration order is used.
    #[default]
    #[serde(rename = "last")]
    LastMatchWins,
    /// Matches carrying different versions are an error.
    #[serde(rename = "fail")]
    FailOnAmbiguous,
}

#[derive(Debug, Clone, Default)]
pub struct LocalVersionResolver {
    policy: MatchPolicy,
}

impl LocalVersionResolver {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn resolve_dependency_version(
        &self,
        dependencies: &[DependencyDescriptor],
        group_substring: &str,
        artifact_name: &str,
    ) -> Result<String> {
        let matches: Vec<&DependencyDescriptor> = dependencies
            .iter()
            .filter(|dep| {
                dep.group_id.contains(group_substring)
                    && dep.artifact_id.eq_ignore_ascii_case(artifact_name)
            })
            .collect();

        let Some(last) = matches.last() else {
            return Err(UploadError::DependencyNotFoundError {
                group: group_substring.to_string(),
                artifact: artifact_name.to_string(),
            });
        };

        let mut versions: Vec<String> = Vec::new();
        for dep in &matches {
            if !versions.contains(&dep.version) {
                versions.push(dep.version.clone());
            }
        }

        if versions.len() > 1 {
            match self.policy {
                MatchPolicy::LastMatchWins => tracing::warn!(
                    "{} is declared {} times with versions [{}], using the last one ({})",
                    artifact_name,
                    matches.len(),
                    versions.join(", "),
                    last.version
                ),
                MatchPolicy::FailOnAmbiguous => {
                    return Err(UploadError::AmbiguousDependency {
                        artifact: artifact_name.to_string(),
                        versions,
                    })
                }
            }
        }

        tracing::debug!("Project is built against {}", last.version);
        Ok(last.version.clone())
    }
}
