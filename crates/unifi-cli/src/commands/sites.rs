use std::io::Write;

use tracing::debug;

use crate::client::CliResult;
use crate::output::Diagnostics;

/// The site listing is acknowledged but not interpreted; only the debug echo
/// prints anything.
pub(crate) fn handle_site_listing<W: Write>(
    body: &str,
    diagnostics: Diagnostics,
    out: &mut W,
) -> CliResult<()> {
    debug!(bytes = body.len(), "site listing received");
    diagnostics.note(out, format_args!("Printing results for GetSites... {body}__"))?;
    Ok(())
}
