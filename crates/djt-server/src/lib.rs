mod client;
mod commands;
mod logging;
mod server;
mod session;
mod workspace;

use anyhow::Result;
use tower_lsp_server::LspService;
use tower_lsp_server::Server;

pub use crate::commands::SHOW_TEMPLATE_HIERARCHY;
pub use crate::server::DjangoTemplateServer;

/// Run the language server on stdio until the client disconnects.
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be built.
pub fn run() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve());
    Ok(())
}

async fn serve() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::build(|client| {
        client::init_client(client);

        let log_guard = logging::init_tracing(|message_type, message| {
            client::log_message(message_type, message);
        });

        DjangoTemplateServer::new(log_guard)
    })
    .finish();

    Server::new(stdin, stdout, socket).serve(service).await;
}
