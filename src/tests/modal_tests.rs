#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::modal::{DialogHost, DialogKey, DialogKind, Dialogs};
    use crate::shell::answer_dialog;
    use crate::surface::MemorySurface;
    use crate::view::{Target, View};

    fn host() -> (Arc<DialogHost>, Arc<MemorySurface>) {
        let surface = Arc::new(MemorySurface::new());
        (Arc::new(DialogHost::new(surface.clone())), surface)
    }

    /// Yields until a dialog is shown.
    async fn wait_open(host: &DialogHost) {
        for _ in 0..100 {
            if host.is_open() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("dialog never opened");
    }

    #[tokio::test]
    async fn test_confirm_enter_accepts() {
        let (host, surface) = host();
        let waiter = {
            let host = host.clone();
            tokio::spawn(async move { host.confirm("Delete world?").await })
        };
        wait_open(&host).await;

        let shown = host.current().unwrap();
        assert_eq!(shown.kind, DialogKind::Confirm);
        assert_eq!(shown.title, "Confirmation");
        assert_eq!(shown.message, "Delete world?");
        assert!(matches!(surface.view(Target::Modal), Some(View::Dialog(_))));

        assert!(host.press(DialogKey::Enter));
        assert!(waiter.await.unwrap());
        assert!(!host.is_open());
        assert_eq!(surface.view(Target::Modal), Some(View::Empty));
    }

    #[tokio::test]
    async fn test_confirm_escape_declines() {
        let (host, _surface) = host();
        let waiter = {
            let host = host.clone();
            tokio::spawn(async move { host.confirm("Kick Steve?").await })
        };
        wait_open(&host).await;
        assert!(host.press(DialogKey::Escape));
        assert!(!waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_prompt_returns_typed_text() {
        let (host, surface) = host();
        let waiter = {
            let host = host.clone();
            tokio::spawn(async move { host.prompt("Enter the new name:", "config.yml").await })
        };
        wait_open(&host).await;

        host.type_text("server");
        match surface.view(Target::Modal) {
            Some(View::Dialog(snapshot)) => {
                assert_eq!(snapshot.title, "Input Required");
                assert_eq!(snapshot.placeholder, "config.yml");
                assert_eq!(snapshot.input, "server");
            }
            other => panic!("unexpected modal view {:?}", other),
        }
        assert!(host.submit("server.properties"));
        assert_eq!(waiter.await.unwrap().as_deref(), Some("server.properties"));
    }

    #[tokio::test]
    async fn test_prompt_escape_returns_none() {
        let (host, _surface) = host();
        let waiter = {
            let host = host.clone();
            tokio::spawn(async move { host.prompt("Folder name:", "").await })
        };
        wait_open(&host).await;
        host.type_text("ignored");
        host.press(DialogKey::Escape);
        assert_eq!(waiter.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dialogs_are_shown_one_at_a_time() {
        let (host, _surface) = host();
        let first = {
            let host = host.clone();
            tokio::spawn(async move { host.alert("first").await })
        };
        wait_open(&host).await;
        let second = {
            let host = host.clone();
            tokio::spawn(async move { host.alert("second").await })
        };
        tokio::task::yield_now().await;
        assert_eq!(host.current().unwrap().message, "first");

        host.press(DialogKey::Enter);
        first.await.unwrap();
        wait_open(&host).await;
        assert_eq!(host.current().unwrap().message, "second");
        host.press(DialogKey::Enter);
        second.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_waiter_clears_dialog() {
        let (host, surface) = host();
        let result = tokio::time::timeout(Duration::from_millis(20), host.confirm("Still there?")).await;
        assert!(result.is_err());
        assert!(!host.is_open());
        assert_eq!(surface.view(Target::Modal), Some(View::Empty));
        assert!(!host.press(DialogKey::Enter));
    }

    #[tokio::test]
    async fn test_answer_dialog_from_input_lines() {
        let (host, _surface) = host();
        assert!(!answer_dialog(&host, "ls"));

        let confirm = {
            let host = host.clone();
            tokio::spawn(async move { host.confirm("Remove Alice?").await })
        };
        wait_open(&host).await;
        assert!(answer_dialog(&host, "Yes\n"));
        assert!(confirm.await.unwrap());

        let declined = {
            let host = host.clone();
            tokio::spawn(async move { host.confirm("Remove Bob?").await })
        };
        wait_open(&host).await;
        assert!(answer_dialog(&host, "nah"));
        assert!(!declined.await.unwrap());

        let prompt = {
            let host = host.clone();
            tokio::spawn(async move { host.prompt("Name:", "").await })
        };
        wait_open(&host).await;
        assert!(answer_dialog(&host, "my world"));
        assert_eq!(prompt.await.unwrap().as_deref(), Some("my world"));

        let cancelled = {
            let host = host.clone();
            tokio::spawn(async move { host.prompt("Name:", "").await })
        };
        wait_open(&host).await;
        assert!(answer_dialog(&host, " ESC "));
        assert_eq!(cancelled.await.unwrap(), None);
    }
}
