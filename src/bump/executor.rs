use crate::bump::BumpTool;
use crate::config::{BumpToolConfig, CommitIdentity, Config};
use crate::domain::BumpLevel;
use crate::error::{BumpError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// Runs the bump program (`bumpversion` by default) as a child process
#[derive(Debug, Clone)]
pub struct ExternalBumpTool {
    tool: BumpToolConfig,
    identity: CommitIdentity,
}

impl ExternalBumpTool {
    pub fn new(tool: BumpToolConfig, identity: CommitIdentity) -> Self {
        ExternalBumpTool { tool, identity }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bump.clone(), config.commit.clone())
    }

    /// Arguments passed to the program, in order
    ///
    /// `<level> <files...> --commit --tag --verbose [--message <template>]`
    pub fn arguments(&self, level: BumpLevel, files: &[PathBuf]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![level.as_str().into()];
        args.extend(files.iter().map(|f| f.clone().into_os_string()));
        args.extend(["--commit", "--tag", "--verbose"].map(OsString::from));

        if let Some(message) = &self.tool.message {
            args.push("--message".into());
            args.push(message.into());
        }

        args
    }

    fn command(&self, level: BumpLevel, files: &[PathBuf]) -> Command {
        let mut cmd = Command::new(&self.tool.program);
        cmd.args(self.arguments(level, files));

        for (key, value) in self.identity.to_env_vars() {
            cmd.env(key, value);
        }

        cmd
    }
}

impl BumpTool for ExternalBumpTool {
    /// Run the tool with inherited stdio so its verbose output lands in the
    /// CI log. Any non-zero exit is an error.
    fn bump(&self, level: BumpLevel, files: &[PathBuf]) -> Result<()> {
        tracing::info!(program = %self.tool.program, %level, files = files.len(), "running bump tool");

        let status = self.command(level, files).status().map_err(|e| {
            BumpError::bump_tool(format!("Failed to execute {}: {}", self.tool.program, e))
        })?;

        if !status.success() {
            return Err(BumpError::bump_tool(format!(
                "{} {} failed with exit code {}",
                self.tool.program,
                level,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(program: &str, message: Option<&str>) -> ExternalBumpTool {
        ExternalBumpTool::new(
            BumpToolConfig {
                program: program.to_string(),
                message: message.map(str::to_string),
            },
            CommitIdentity::default(),
        )
    }

    #[test]
    fn test_arguments_without_message() {
        let args = tool("bumpversion", None)
            .arguments(BumpLevel::Patch, &[PathBuf::from("setup.py"), PathBuf::from("VERSION")]);

        assert_eq!(
            args,
            ["patch", "setup.py", "VERSION", "--commit", "--tag", "--verbose"]
                .map(OsString::from)
                .to_vec()
        );
    }

    #[test]
    fn test_arguments_with_message() {
        let args = tool("bumpversion", Some("Release {new_version}"))
            .arguments(BumpLevel::Major, &[PathBuf::from("setup.py")]);

        assert_eq!(args.len(), 7);
        assert_eq!(args[5], OsString::from("--message"));
        assert_eq!(args[6], OsString::from("Release {new_version}"));
    }

    #[test]
    fn test_identity_is_exported() {
        let bump = ExternalBumpTool::new(
            BumpToolConfig::default(),
            CommitIdentity {
                name: Some("CI Bot".to_string()),
                email: Some("ci@example.com".to_string()),
            },
        );

        let cmd = bump.command(BumpLevel::Patch, &[]);
        let envs: Vec<_> = cmd.get_envs().collect();
        assert_eq!(envs.len(), 4);
    }

    #[test]
    fn test_missing_program_fails() {
        let result = tool("/nonexistent/path/to/bumpversion", None)
            .bump(BumpLevel::Patch, &[PathBuf::from("file")]);

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to execute"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_fails() {
        let result = tool("false", None).bump(BumpLevel::Patch, &[]);
        assert!(result.unwrap_err().to_string().contains("exit code 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_succeeds() {
        assert!(tool("true", None).bump(BumpLevel::Minor, &[]).is_ok());
    }
}
