#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use crate::command::Command;
    use crate::filemanager::{MenuItem, SortColumn};
    use crate::router::PageId;
    use crate::shell::{help, parse_line, ShellCommand};
    use crate::types::{AccessListKind, PlayerAction, RecipeDraft, RecipeResult};

    fn dispatched(line: &str) -> Command {
        match parse_line(line) {
            Ok(ShellCommand::Dispatch(command)) => command,
            other => panic!("{:?} did not dispatch: {:?}", line, other),
        }
    }

    fn rejected(line: &str) -> String {
        match parse_line(line) {
            Err(err) => err.user_message(),
            Ok(other) => panic!("{:?} was accepted as {:?}", line, other),
        }
    }

    #[test]
    fn test_control_words() {
        assert_eq!(parse_line("").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("   ").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("help").unwrap(), ShellCommand::Help);
        assert_eq!(parse_line("?").unwrap(), ShellCommand::Help);
        assert_eq!(parse_line("exit").unwrap(), ShellCommand::Quit);
        assert_eq!(parse_line("quit").unwrap(), ShellCommand::Quit);
        let message = rejected("dance");
        assert!(message.contains("'dance'"), "{}", message);
        assert!(message.ends_with("try 'help'"), "{}", message);
    }

    #[test]
    fn test_help_lists_every_command() {
        let text = help();
        for word in ["page", "kick", "allow", "unlist", "cmd", "prop", "recipe", "cd", "upload", "menu", "pick", "quit"] {
            assert!(text.contains(word), "help is missing {}", word);
        }
        assert!(text.contains("'esc' cancels"));
    }

    #[test]
    fn test_page_selection() {
        assert_eq!(dispatched("page players"), Command::SelectPage(PageId::Players));
        assert_eq!(dispatched("page file-manager"), Command::SelectPage(PageId::Files));
        assert_eq!(rejected("page nowhere"), "Unknown page: nowhere");
        assert!(rejected("page").contains("<PAGE>"));
    }

    #[test]
    fn test_player_commands() {
        assert_eq!(
            dispatched("kick abc Steve"),
            Command::PlayerAction { uuid: "abc".into(), name: "Steve".into(), action: PlayerAction::Kick }
        );
        assert_eq!(
            dispatched("deop abc"),
            Command::PlayerAction { uuid: "abc".into(), name: "abc".into(), action: PlayerAction::Deop }
        );
        assert_eq!(dispatched("inv abc Steve"), Command::ShowInventory { uuid: "abc".into(), name: "Steve".into() });
        assert_eq!(dispatched("who  ste ve "), Command::SearchPlayers("ste ve".into()));
        assert!(rejected("ban").contains("<UUID>"));
        assert!(parse_line("kick a b c").is_err());
    }

    #[test]
    fn test_access_list_commands() {
        assert_eq!(
            dispatched("allow Alice"),
            Command::AccessAdd { kind: AccessListKind::Whitelist, name: "Alice".into(), uuid: None }
        );
        assert_eq!(
            dispatched("opadd Alice 069a79f4-44e9-4726-a5be-fca90e38aaf5"),
            Command::AccessAdd {
                kind: AccessListKind::Ops,
                name: "Alice".into(),
                uuid: Some("069a79f4-44e9-4726-a5be-fca90e38aaf5".into()),
            }
        );
        assert_eq!(
            dispatched("unlist blacklist u1 Griefer"),
            Command::AccessRemove { kind: AccessListKind::Blacklist, uuid: "u1".into(), name: "Griefer".into() }
        );
        assert_eq!(rejected("unlist friends u1"), "unknown list: friends");
        assert!(parse_line("unlist ops").is_err());
    }

    #[test]
    fn test_text_commands_keep_spacing() {
        assert_eq!(dispatched("cmd  say hello world"), Command::SendCommand("say hello world".into()));
        assert_eq!(dispatched("say hi  there"), Command::SendChat("hi  there".into()));
        assert_eq!(dispatched("grep WARN"), Command::SearchLogs("WARN".into()));
        assert_eq!(dispatched("find"), Command::SearchFiles(String::new()));
        assert_eq!(dispatched("cmd op --force Steve"), Command::SendCommand("op --force Steve".into()));
    }

    #[test]
    fn test_settings_pairs() {
        match dispatched("prop motd=Hello max-players=30 white-list=true") {
            Command::SaveProperties(values) => {
                assert_eq!(values.len(), 3);
                assert_eq!(values["motd"], json!("Hello"));
                assert_eq!(values["max-players"], json!("30"));
                assert_eq!(values["white-list"], json!(true));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(dispatched("rule keepInventory=false"), Command::SaveGameRules(v) if v["keepInventory"] == json!(false)));
        assert!(rejected("rule").contains("KEY=VALUE"));
        assert_eq!(rejected("prop motd"), "not a key=value pair: motd");
    }

    #[test]
    fn test_recipe_commands() {
        assert_eq!(dispatched("recipe edit r1"), Command::EditRecipe("r1".into()));
        assert_eq!(dispatched("recipe rm r1"), Command::DeleteRecipe("r1".into()));
        assert_eq!(dispatched("recipe clear"), Command::ClearRecipeForm);
        assert_eq!(
            dispatched("recipe save shapeless minecraft:stick 4 minecraft:oak_planks,-,,minecraft:oak_planks"),
            Command::SaveRecipe(RecipeDraft {
                shaped: false,
                ingredients: vec![
                    Some("minecraft:oak_planks".into()),
                    None,
                    None,
                    Some("minecraft:oak_planks".into()),
                ],
                result: RecipeResult { item: "minecraft:stick".into(), count: 4 },
            })
        );
        assert_eq!(rejected("recipe save round minecraft:stick 4 a"), "expected shaped or shapeless, got round");
        assert_eq!(rejected("recipe save shaped minecraft:stick many a"), "not a count: many");
    }

    #[test]
    fn test_file_commands() {
        assert_eq!(parse_line("cd ..").unwrap(), ShellCommand::Parent);
        assert_eq!(dispatched("cd"), Command::Browse(String::new()));
        assert_eq!(dispatched("cd plugins/Essentials"), Command::Browse("plugins/Essentials".into()));
        assert_eq!(dispatched("ls"), Command::RefreshFiles);
        assert_eq!(dispatched("sort size"), Command::SortFiles(SortColumn::Size));
        assert_eq!(dispatched("sort date"), Command::SortFiles(SortColumn::Modified));
        assert_eq!(dispatched("rm logs/latest.log"), Command::Delete { path: "logs/latest.log".into(), is_directory: false });
        assert_eq!(dispatched("rmdir world_nether"), Command::Delete { path: "world_nether".into(), is_directory: true });
        assert_eq!(dispatched("mv server.properties"), Command::Rename("server.properties".into()));
        assert_eq!(dispatched("mkdir"), Command::CreateFolder);
        assert_eq!(dispatched("log"), Command::ShowChangeLog);
        assert_eq!(parse_line("save ./local.yml").unwrap(), ShellCommand::SaveFrom(PathBuf::from("./local.yml")));
        assert_eq!(
            parse_line("upload a.jar b.jar").unwrap(),
            ShellCommand::UploadFrom(vec![PathBuf::from("a.jar"), PathBuf::from("b.jar")])
        );
        assert!(rejected("upload").contains("<FILES>"));
    }

    #[test]
    fn test_context_menu_commands() {
        assert_eq!(dispatched("menu ops.json 10 20"), Command::ContextMenu { path: "ops.json".into(), x: 10, y: 20 });
        assert_eq!(dispatched("pick open"), Command::MenuAction(MenuItem::OpenPicture));
        assert_eq!(dispatched("pick delete"), Command::MenuAction(MenuItem::Delete));
        assert_eq!(dispatched("menu ops.json -5 20"), Command::ContextMenu { path: "ops.json".into(), x: -5, y: 20 });
        assert!(rejected("menu ops.json ten 20").contains("invalid value 'ten'"));
        assert_eq!(rejected("pick eat"), "unknown menu entry: eat");
    }
}
