use catalogue_core::{Msg, PageNav, PageSize, SortOrder};

pub const HELP: &str = "commands: n/next p/prev f/first l/last <page> | page <n> | \
sort newest|oldest | size 10|20|50 | r/retry | q/quit";

/// What one line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msg(Msg),
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Msg(Msg::NoOp);
    }
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_ascii_lowercase();
    let argument = words.next();
    if words.next().is_some() {
        return Input::Help;
    }

    let msg = match (command.as_str(), argument) {
        ("q" | "quit" | "exit", None) => return Input::Quit,
        ("n" | "next", None) => Msg::Navigate(PageNav::Next),
        ("p" | "prev" | "previous", None) => Msg::Navigate(PageNav::Previous),
        ("f" | "first", None) => Msg::Navigate(PageNav::First),
        ("l" | "last", None) => Msg::Navigate(PageNav::Last),
        ("r" | "retry", None) => Msg::RetryClicked,
        ("page", Some(page)) => match page.parse() {
            Ok(page) => Msg::PageRequested(page),
            Err(_) => return Input::Help,
        },
        ("sort", Some(sort)) => match SortOrder::parse(sort) {
            Some(sort) => Msg::SortChanged(sort),
            None => return Input::Help,
        },
        ("size", Some(size)) => match PageSize::parse(size) {
            Some(size) => Msg::PageSizeChanged(size),
            None => return Input::Help,
        },
        (page, None) => match page.parse() {
            Ok(page) => Msg::PageRequested(page),
            Err(_) => return Input::Help,
        },
        _ => return Input::Help,
    };
    Input::Msg(msg)
}
