use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use pwm_rtl::PwmConfig;
use tracing::debug;

use crate::error::{Error, Result};
use crate::verify::ObservationLog;

/// Dump `log` to `path` as a Value Change Dump, one time unit per tick.
pub fn dump_vcd(log: &ObservationLog, config: &PwmConfig, path: &Path) -> Result<()> {
  let wrap = |source: io::Error| Error::WriteFile {
    path: path.to_path_buf(),
    source,
  };
  let mut fd = BufWriter::new(File::create(path).map_err(wrap)?);
  write_vcd(log, config, &mut fd).map_err(wrap)?;
  fd.flush().map_err(wrap)?;
  debug!(path = %path.display(), samples = log.len(), "waveform dumped");
  Ok(())
}

pub fn write_vcd<W: Write>(log: &ObservationLog, config: &PwmConfig, fd: &mut W) -> io::Result<()> {
  writeln!(fd, "$comment {} $end", config)?;
  writeln!(fd, "$timescale 1ns $end")?;
  writeln!(fd, "$scope module pwm $end")?;
  writeln!(fd, "$var wire 1 ! pwm_out $end")?;
  writeln!(fd, "$upscope $end")?;
  writeln!(fd, "$enddefinitions $end")?;
  let mut last = None;
  for o in log.iter() {
    if last == Some(o.level) {
      continue;
    }
    writeln!(fd, "#{}", o.tick_index)?;
    if last.is_none() {
      writeln!(fd, "$dumpvars")?;
      writeln!(fd, "{}!", o.level as u8)?;
      writeln!(fd, "$end")?;
    } else {
      writeln!(fd, "{}!", o.level as u8)?;
    }
    last = Some(o.level);
  }
  // Close the window so viewers show the last level for its full length.
  if !log.is_empty() {
    writeln!(fd, "#{}", log.last_tick() + 1)?;
  }
  Ok(())
}
