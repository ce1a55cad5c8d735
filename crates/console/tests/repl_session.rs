use console::client::mock::{MockRestaurantApi, MOCK_PASSWORD};
use console::state::Tab;
use console::{repl, AdminConsole};

async fn run_script(console: &mut AdminConsole<MockRestaurantApi>, script: &str) -> anyhow::Result<String> {
    let mut out: Vec<u8> = Vec::new();
    repl::run(console, script.as_bytes(), &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn scripted_add_edit_delete() -> anyhow::Result<()> {
    let mut console = AdminConsole::new(MockRestaurantApi::default());
    let script = format!(
        "login admin {MOCK_PASSWORD}\n\
         tab add\n\
         set title Soup\n\
         set price 5\n\
         submit\n\
         edit 1\n\
         set title Soup Deluxe\n\
         submit\n\
         list\n\
         delete 1\n\
         confirm\n\
         quit\n\
         list\n"
    );
    let out = run_script(&mut console, &script).await?;

    assert!(out.contains("Item added successfully!"));
    assert!(out.contains("Item updated successfully!"));
    assert!(out.contains("1. Soup Deluxe  5 USD"));
    assert!(out.contains("Item deleted successfully!"));

    let calls = console.api().calls();
    assert_eq!(calls.iter().filter(|c| *c == "create_item").count(), 1);
    assert_eq!(calls.iter().filter(|c| *c == "update_item").count(), 1);
    assert_eq!(calls.iter().filter(|c| *c == "delete_item").count(), 1);
    // nothing after `quit` ran
    assert_eq!(console.workspace().map(|w| w.tab), Some(Tab::Menu));
    Ok(())
}

#[tokio::test]
async fn usage_errors_do_not_end_the_session() -> anyhow::Result<()> {
    let mut console = AdminConsole::new(MockRestaurantApi::default());
    let out = run_script(&mut console, "edit 1\nlogin admin nope\nfrobnicate\nhelp\n").await?;
    assert!(out.contains("error: log in first"));
    assert!(out.contains("! Invalid credentials"));
    assert!(out.contains("unknown command `frobnicate`"));
    assert!(out.contains("rename <name>"));
    assert!(console.workspace().is_none());
    Ok(())
}
