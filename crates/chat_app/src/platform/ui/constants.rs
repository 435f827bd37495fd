pub const CMD_LOAD: &str = "/load";
pub const CMD_STATUS: &str = "/status";
pub const CMD_SEND: &str = "/send";
pub const CMD_QUIT: &str = "/quit";
pub const CMD_EXIT: &str = "/exit";

/// Trailing marker that continues the input on the next line (Shift+Enter).
pub const LINE_CONTINUATION: char = '\\';

pub const PROMPT: &str = "> ";
pub const PROMPT_CONTINUED: &str = ".. ";

pub const LABEL_USER: &str = "you";
pub const LABEL_AI: &str = "ai ";
