use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};
use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_sdk::signature::Signature;
use woofi_interface::{
    error::WoofiProgramError,
    instructions::InstructionTag,
};

use crate::{
    error::ClientError,
    transactions::log_instruction_error,
};

#[derive(strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Message {
    Info,
    Success,
    Warning,
    Error,
}

fn format_line(msg_ty: Message, label: impl Display, msg: impl Display) -> String {
    let color = msg_ty.get_color();
    format!(
        "[{}] {} {}",
        msg_ty.to_string().color(color),
        label.to_string().color(LogColor::Debug),
        msg.to_string().bright_black()
    )
}

fn log(msg_ty: Message, label: impl Display, msg: impl Display) {
    println!("{}", format_line(msg_ty, label, msg));
}

impl Message {
    fn get_color(&self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Highlight,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Debug,
    Error,
    Warning,
    Info,
    Gray,
}

#[rustfmt::skip]
mod unformatted {
    use super::*;

    pub fn log_info(label: impl Display, msg: impl Display) { log(Message::Info, label, msg) }
    pub fn log_success(label: impl Display, msg: impl Display) { log(Message::Success, label, msg) }
    pub fn log_warning(label: impl Display, msg: impl Display) { log(Message::Warning, label, msg) }
    pub fn log_error(label: impl Display, msg: impl Display) { log(Message::Error, label, msg) }

    impl From<LogColor> for Color {
        fn from(value: LogColor) -> Color {
            match value {
                LogColor::Highlight  => Color::TrueColor { r: 255, g: 215, b: 87  },
                LogColor::Debug      => Color::TrueColor { r: 40,  g: 100, b: 153 },
                LogColor::Error      => Color::TrueColor { r: 255, g: 0,   b: 45  },
                LogColor::Warning    => Color::TrueColor { r: 180, g: 105, b: 0   },
                LogColor::Info       => Color::TrueColor { r: 0,   g: 95,  b: 255 },
                LogColor::Gray       => Color::TrueColor { r: 192, g: 192, b: 192 },
            }
        }
    }
}

pub use unformatted::*;

/// Logs a confirmed transaction's signature and fee payer.
pub fn log_confirmed(signature: &Signature, payer: &Pubkey) {
    let sender_info = format!("{}: {payer}", "sender".color(LogColor::Gray));
    log_success("Signature", format!("{signature}\n{sender_info}"));
}

/// Logs the `woofi` instruction a rejection came from, with the program's error when it has one.
pub fn log_rejected_instruction(tag: InstructionTag, error: Option<WoofiProgramError>) {
    match error {
        Some(error) => log_error("Woofi error", format!("({tag}, {error})")),
        None => log_error("Rejected instruction", tag),
    }
}

/// Logs a failed submission. Rejections are traced back to their instruction. Failures without a
/// ledger verdict are logged as warnings.
pub fn log_send_failure(
    error: &ClientError,
    instructions: &[Instruction],
    program_id: &Pubkey,
    payer: &Pubkey,
) {
    match error.transaction_error() {
        Some(tx_error) => {
            log_instruction_error(tx_error, instructions, program_id);
            log_info("Payer", payer);
        }
        None => log_warning("Unconfirmed", error),
    }
}
