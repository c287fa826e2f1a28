use crate::domain::model::DependencyDescriptor;
use crate::utils::error::{Result, UploadError};
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Minimal POM model: the coordinates, naming and dependencies an upload needs.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PomDocument {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub parent: Option<PomParent>,
    #[serde(default)]
    pub properties: Option<HashMap<String, String>>,
    #[serde(default)]
    pub dependencies: Option<PomDependencies>,
    #[serde(default)]
    pub dependency_management: Option<PomDependencyManagement>,
    #[serde(default)]
    pub build: Option<PomBuild>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PomParent {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PomDependencies {
    #[serde(default, rename = "dependency")]
    pub items: Vec<PomDependency>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PomDependencyManagement {
    #[serde(default)]
    pub dependencies: Option<PomDependencies>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PomBuild {
    #[serde(default)]
    pub final_name: Option<String>,
}

impl PomDocument {
    pub fn parse(xml: &str) -> Result<Self> {
        from_str(xml).map_err(|e| UploadError::PomError {
            path: "<memory>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let pom_error = |message: String| UploadError::PomError {
            path: path.display().to_string(),
            message,
        };

        let xml = std::fs::read_to_string(path).map_err(|e| pom_error(e.to_string()))?;
        from_str(&xml).map_err(|e| pom_error(e.to_string()))
    }

    /// Version of the project, inherited from `<parent>` when not declared.
    pub fn project_version(&self) -> Option<String> {
        let version = self
            .version
            .clone()
            .or_else(|| self.parent.as_ref().and_then(|p| p.version.clone()))?;
        Some(self.interpolate(&version))
    }

    fn project_group(&self) -> Option<String> {
        self.group_id
            .clone()
            .or_else(|| self.parent.as_ref().and_then(|p| p.group_id.clone()))
    }

    /// Project name used as the default upload slug.
    pub fn display_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(|name| self.interpolate(name))
            .or_else(|| self.artifact_id.clone())
    }

    /// All declared dependencies, regardless of scope. Dependencies whose version
    /// cannot be determined are skipped.
    pub fn dependency_descriptors(&self) -> Vec<DependencyDescriptor> {
        let Some(deps) = &self.dependencies else {
            return vec![];
        };

        deps.items
            .iter()
            .filter_map(|dep| match self.resolve_version(dep) {
                Some(version) => Some(DependencyDescriptor::new(
                    dep.group_id.clone(),
                    dep.artifact_id.clone(),
                    self.interpolate(&version),
                )),
                None => {
                    tracing::debug!(
                        "Skipping {}:{} from POM: no version declared",
                        dep.group_id,
                        dep.artifact_id
                    );
                    None
                }
            })
            .collect()
    }

    /// Resolve a dependency version using `dependencyManagement` if explicit version is absent.
    fn resolve_version(&self, dep: &PomDependency) -> Option<String> {
        if dep.version.is_some() {
            return dep.version.clone();
        }

        self.dependency_management
            .as_ref()
            .and_then(|dm| dm.dependencies.as_ref())
            .and_then(|deps| {
                deps.items.iter().find(|managed| {
                    managed.group_id == dep.group_id && managed.artifact_id == dep.artifact_id
                })
            })
            .and_then(|managed| managed.version.clone())
    }

    /// Where `mvn package` leaves the artifact, relative to the POM's directory.
    pub fn default_artifact_path(&self, project_dir: &Path) -> Option<PathBuf> {
        let extension = match self.packaging.as_deref() {
            Some("pom") => return None,
            Some("war") => "war",
            _ => "jar",
        };

        let file_stem = match self.build.as_ref().and_then(|b| b.final_name.as_deref()) {
            Some(final_name) => self.interpolate(final_name),
            None => format!("{}-{}", self.artifact_id.as_deref()?, self.project_version()?),
        };

        Some(
            project_dir
                .join("target")
                .join(format!("{}.{}", file_stem, extension)),
        )
    }

    /// Replaces `${...}` references with project coordinates or `<properties>` values.
    /// Unknown references are left untouched.
    fn interpolate(&self, value: &str) -> String {
        if !value.contains("${") {
            return value.to_string();
        }

        let Ok(re) = Regex::new(r"\$\{([^}]+)\}") else {
            return value.to_string();
        };

        re.replace_all(value, |caps: &regex::Captures| {
            let key = &caps[1];
            self.lookup_property(key)
                .unwrap_or_else(|| format!("${{{}}}", key))
        })
        .to_string()
    }

    fn lookup_property(&self, key: &str) -> Option<String> {
        match key {
            "project.version" | "pom.version" | "version" => self
                .version
                .clone()
                .or_else(|| self.parent.as_ref().and_then(|p| p.version.clone())),
            "project.groupId" | "pom.groupId" | "groupId" => self.project_group(),
            "project.artifactId" | "pom.artifactId" | "artifactId" => self.artifact_id.clone(),
            "project.name" => self.name.clone(),
            _ => self
                .properties
                .as_ref()
                .and_then(|props| props.get(key).cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PLUGIN_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/maven-v4_0_0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <groupId>name.example</groupId>
    <artifactId>banhammer</artifactId>
    <version>2.1.0-SNAPSHOT</version>
    <name>BanHammer</name>
    <properties>
        <bukkit.version>1.7.2-R0.3</bukkit.version>
    </properties>
    <dependencies>
        <dependency>
            <groupId>org.bukkit</groupId>
            <artifactId>bukkit</artifactId>
            <version>${bukkit.version}</version>
            <scope>provided</scope>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <scope>test</scope>
        </dependency>
        <dependency>
            <groupId>name.example</groupId>
            <artifactId>banhammer-api</artifactId>
            <version>${project.version}</version>
        </dependency>
    </dependencies>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>junit</groupId>
                <artifactId>junit</artifactId>
                <version>4.11</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>
"#;

    #[test]
    fn parse_plugin_pom() {
        let pom = PomDocument::parse(PLUGIN_POM).unwrap();
        assert_eq!(pom.artifact_id.as_deref(), Some("banhammer"));
        assert_eq!(pom.project_version().as_deref(), Some("2.1.0-SNAPSHOT"));
        assert_eq!(pom.display_name().as_deref(), Some("BanHammer"));
    }

    #[test]
    fn dependencies_are_interpolated_and_managed() {
        let pom = PomDocument::parse(PLUGIN_POM).unwrap();
        let deps = pom.dependency_descriptors();

        assert_eq!(
            deps,
            vec![
                DependencyDescriptor::new("org.bukkit", "bukkit", "1.7.2-R0.3"),
                DependencyDescriptor::new("junit", "junit", "4.11"),
                DependencyDescriptor::new("name.example", "banhammer-api", "2.1.0-SNAPSHOT"),
            ]
        );
    }

    #[test]
    fn dependency_without_any_version_is_skipped() {
        let pom = PomDocument::parse(
            r#"<project>
                <artifactId>demo</artifactId>
                <version>1.0</version>
                <dependencies>
                    <dependency>
                        <groupId>org.bukkit</groupId>
                        <artifactId>bukkit</artifactId>
                    </dependency>
                </dependencies>
            </project>"#,
        )
        .unwrap();
        assert!(pom.dependency_descriptors().is_empty());
    }

    #[test]
    fn default_artifact_path_follows_maven_layout() {
        let pom = PomDocument::parse(PLUGIN_POM).unwrap();
        assert_eq!(
            pom.default_artifact_path(Path::new("/work/banhammer")),
            Some(PathBuf::from("/work/banhammer/target/banhammer-2.1.0-SNAPSHOT.jar"))
        );
    }

    #[test]
    fn final_name_and_parent_version() {
        let pom = PomDocument::parse(
            r#"<project>
                <parent>
                    <groupId>name.example</groupId>
                    <version>3.0</version>
                </parent>
                <artifactId>child</artifactId>
                <build>
                    <finalName>${project.artifactId}-plugin-${project.version}</finalName>
                </build>
            </project>"#,
        )
        .unwrap();

        assert_eq!(pom.project_version().as_deref(), Some("3.0"));
        assert_eq!(pom.display_name().as_deref(), Some("child"));
        assert_eq!(
            pom.default_artifact_path(Path::new("proj")),
            Some(PathBuf::from("proj/target/child-plugin-3.0.jar"))
        );
    }

    #[test]
    fn pom_packaging_has_no_artifact() {
        let pom = PomDocument::parse(
            "<project><artifactId>parent</artifactId><version>1</version><packaging>pom</packaging></project>",
        )
        .unwrap();
        assert_eq!(pom.default_artifact_path(Path::new(".")), None);
    }

    #[test]
    fn from_file_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<project><artifactId>broken</groupId></project>").unwrap();

        match PomDocument::from_file(file.path()) {
            Err(UploadError::PomError { path, .. }) => {
                assert_eq!(path, file.path().display().to_string())
            }
            other => panic!("expected PomError, got {:?}", other),
        }
    }

    #[test]
    fn from_file_missing() {
        let err = PomDocument::from_file("/definitely/not/here/pom.xml").unwrap_err();
        assert!(matches!(err, UploadError::PomError { .. }));
    }
}
