use anyhow::Result;
use crate::server::run_server;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = port.unwrap_or(ctx.config.server.port);
    let addr = format!("{}:{}", host, port);

    println!("Starting complaint server on http://{}", addr);
    if ctx.config.server.staff_token.is_none() {
        println!("Status updates are open (no server.staff_token configured)");
    }

    tokio::runtime::Runtime::new()?
        .block_on(async { run_server(&ctx.config, &ctx.root, &addr).await })?;
    Ok(())
}
