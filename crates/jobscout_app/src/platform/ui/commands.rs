use jobscout_core::{AppViewModel, Msg};

/// One line of user input, parsed without looking at state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Site name, or its 1-based position in the rendered site list.
    SelectSite(String),
    Keyword(String),
    Search,
    Reload,
    Help,
    Quit,
    Redraw,
    Unknown(String),
}

/// What the app loop should do with a command once state is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    ShowHelp,
    Reject(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Command::Redraw,
        "site" | "s" if !rest.is_empty() => Command::SelectSite(rest.to_string()),
        "keyword" | "k" => Command::Keyword(rest.to_string()),
        "search" | "go" => Command::Search,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Resolves a command against the current view. Controls the view shows as
/// disabled reject their commands here.
pub fn resolve(command: Command, view: &AppViewModel) -> Action {
    match command {
        Command::SelectSite(arg) => resolve_site(arg, view),
        Command::Keyword(keyword) => Action::Dispatch(Msg::KeywordChanged(keyword)),
        Command::Search if view.is_loading => {
            Action::Reject("A search is already running, please wait.".to_string())
        }
        // No selection still dispatches so the core can report it.
        Command::Search => Action::Dispatch(Msg::SearchClicked),
        Command::Reload if view.is_loading => {
            Action::Reject("Reload is disabled while a search is running.".to_string())
        }
        Command::Reload => Action::Dispatch(Msg::RefreshSites),
        Command::Help => Action::ShowHelp,
        Command::Quit => Action::Dispatch(Msg::QuitRequested),
        Command::Redraw => Action::Dispatch(Msg::Tick),
        Command::Unknown(line) => {
            Action::Reject(format!("Unknown command {line:?}. Type 'help' for commands."))
        }
    }
}

/// Site ids are opaque and may look numeric, so an exact name wins over a
/// list position.
fn resolve_site(arg: String, view: &AppViewModel) -> Action {
    if !view.site_selector_enabled {
        return Action::Reject("No sites loaded yet; try 'reload'.".to_string());
    }
    if view.sites.contains(&arg) {
        return Action::Dispatch(Msg::SiteSelected(arg));
    }
    match arg.parse::<usize>() {
        Ok(number) => match number.checked_sub(1).and_then(|index| view.sites.get(index)) {
            Some(site) => Action::Dispatch(Msg::SiteSelected(site.clone())),
            None => Action::Reject(format!(
                "No site number {number}; pick 1 to {}.",
                view.sites.len()
            )),
        },
        Err(_) => Action::Reject(format!("Unknown site {arg:?}.")),
    }
}
