//! Ops command handler

use crate::error::CliResult;
use abacus::core::Operation;
use std::io::Write;

/// Print the operation catalogue: menu code, name, label and arity
pub fn list_operations<W: Write>(out: &mut W) -> CliResult<()> {
    writeln!(out, "{:>4}  {:<10}{:<16}ARITY", "CODE", "NAME", "LABEL")?;
    for op in Operation::ALL {
        writeln!(
            out,
            "{:>4}  {:<10}{:<16}{}",
            op.code(),
            op.name(),
            op.label(),
            op.arity()
        )?;
    }
    Ok(())
}
