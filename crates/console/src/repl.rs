use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::client::RestaurantApi;
use crate::command::{Command, HELP};
use crate::console::AdminConsole;
use crate::errors::ConsoleError;
use crate::render::render;

/// Apply one command to the console.
pub async fn execute<C: RestaurantApi>(console: &mut AdminConsole<C>, cmd: Command) -> Result<(), ConsoleError> {
    match cmd {
        Command::Login { username, password } => console.login(&username, &password).await?,
        Command::Logout => console.logout(),
        Command::Tab(tab) => console.select_tab(tab)?,
        Command::List => {
            console.select_tab(crate::state::Tab::Menu)?;
            console.menu().await?;
        }
        Command::Edit(n) => console.edit(n)?,
        Command::Delete(n) => console.request_delete(n)?,
        Command::Confirm => console.confirm_delete().await?,
        Command::Cancel => console.cancel_delete()?,
        Command::Set { field, value } => console.set_field(&field, &value)?,
        Command::Image(path) => console.attach_image(&path).await?,
        Command::RemoveImage => console.remove_image()?,
        Command::Logo(path) => console.upload_logo(&path).await?,
        Command::Rename(name) => console.rename(&name).await?,
        Command::Submit => console.submit().await?,
        Command::CancelEdit => console.cancel_edit()?,
        Command::Refresh => console.refresh().await?,
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

/// Read commands line by line, printing the screen after each one.
pub async fn run<C, R, W>(console: &mut AdminConsole<C>, input: R, mut output: W) -> Result<(), ConsoleError>
where
    C: RestaurantApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(render(console.screen()).as_bytes()).await?;
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => format!("{HELP}\n"),
            Ok(Some(cmd)) => {
                debug!(command = cmd.name(), "console command");
                match execute(console, cmd).await {
                    Ok(()) => render(console.screen()),
                    Err(e) => format!("error: {e}\n"),
                }
            }
            Err(e) => format!("error: {e}\n"),
        };
        output.write_all(text.as_bytes()).await?;
    }
    output.flush().await?;
    Ok(())
}
