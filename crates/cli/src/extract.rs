use anyhow::Context;
use clap::Parser;
use std::io::{self, Read, Write};

use gp2gp_cli::init_tracing;
use mhs_journal::{
    extract_last_payload, extract_last_payload_for_conversation, read_outbound_messages,
};

#[derive(Parser)]
#[command(name = "mhs-journal-extract")]
#[command(about = "Print the payload of the last outbound message in an MHS mock journal read from stdin")]
struct Cli {
    /// Treat stdin as a conversation-keyed journal and read this conversation
    #[arg(long)]
    conversation_id: Option<String>,
    /// List every recorded message instead of printing the last payload
    #[arg(long, conflicts_with = "conversation_id")]
    describe: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("mhs_journal=warn")?;

    let cli = Cli::parse();

    let mut raw_input = String::new();
    io::stdin()
        .read_to_string(&mut raw_input)
        .context("failed to read journal from standard input")?;

    let mut stdout = io::stdout().lock();

    if cli.describe {
        let messages = read_outbound_messages(&raw_input)?;
        for (index, message) in messages.iter().enumerate() {
            writeln!(
                stdout,
                "{}\tpayload={} bytes\tattachments={}\texternal_attachments={}",
                index,
                message.payload.len(),
                message.attachment_count(),
                message.external_attachment_count()
            )?;
        }
        return Ok(());
    }

    let payload = match cli.conversation_id {
        Some(conversation_id) => {
            extract_last_payload_for_conversation(&raw_input, &conversation_id)?
        }
        None => extract_last_payload(&raw_input)?,
    };

    stdout
        .write_all(payload.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write payload to standard output")?;

    Ok(())
}
