use crate::core::app::EditorApp;
/// Application control commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Exit application. The interactive loop saves the session on the way out.
#[derive(Clone)]
pub struct Exit;

impl Command for Exit {
    fn execute(&self, _app: &mut EditorApp, _args: &str) -> DispatchResult {
        DispatchResult::Exit
    }

    fn usage(&self) -> &'static str {
        "exit"
    }
}

/// List every command with its synopsis, then the aliases
#[derive(Clone)]
pub struct Help;

impl Command for Help {
    fn execute(&self, app: &mut EditorApp, _args: &str) -> DispatchResult {
        let mut usages: Vec<&str> = app.command_registry.values().map(|c| c.usage()).collect();
        usages.sort_unstable();

        let mut aliases: Vec<String> = app
            .config
            .aliases
            .iter()
            .map(|(alias, command)| format!("{alias}={command}"))
            .collect();
        aliases.sort_unstable();

        let mut out = String::from("commands:\n");
        for usage in usages {
            out.push_str("  ");
            out.push_str(usage);
            out.push('\n');
        }
        out.push_str("aliases: ");
        out.push_str(&aliases.join(" "));
        DispatchResult::Info(out)
    }

    fn usage(&self) -> &'static str {
        "help"
    }
}

#[cfg(test)]
mod tests {
    use crate::core::app::EditorApp;
    use crate::core::dispatcher::{DispatchResult, dispatch};

    #[test]
    fn test_help_lists_commands_and_aliases() {
        let mut app = EditorApp::new();
        let DispatchResult::Info(help) = dispatch(&mut app, "?") else {
            panic!("help failed");
        };
        assert!(help.contains("  insert <line:col> \"text\"\n"));
        assert!(help.contains("  dir-tree [<dir>]\n"));
        assert!(help.contains("w=save"));
    }
}
