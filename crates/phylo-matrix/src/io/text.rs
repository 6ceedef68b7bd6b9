//! Shape-less whitespace-separated text format.
//!
//! A matrix is written as `nrows` lines of `ncols` values. Reading is purely
//! positional: the caller supplies the shape and exactly `nrows * ncols`
//! tokens are consumed, so several matrices can follow each other in one
//! stream.
use std::io::{self, BufRead, Write};

use crate::config::{PrintFormat, ReadPolicy};
use crate::error::MatrixError;
use crate::math::Matrix;

/// Pulls whitespace-separated tokens out of a reader without consuming
/// anything past the whitespace that follows the last token returned.
pub struct TokenReader<R> {
    inner: R,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        loop {
            let (skip, available) = {
                let buf = self.inner.fill_buf()?;
                let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
                (skip, buf.len())
            };
            self.inner.consume(skip);
            if available == 0 || skip < available {
                return Ok(());
            }
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        self.skip_whitespace()?;
        let mut token = Vec::new();
        loop {
            let (take, available) = {
                let buf = self.inner.fill_buf()?;
                let take = buf.iter().take_while(|b| !b.is_ascii_whitespace()).count();
                token.extend_from_slice(&buf[..take]);
                (take, buf.len())
            };
            self.inner.consume(take);
            if available == 0 || take < available {
                break;
            }
        }
        if token.is_empty() {
            return Ok(None);
        }
        self.skip_whitespace()?;
        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }
}

/// C-style `%W.Pe`: at least two exponent digits, always signed.
fn format_scientific(value: f64, width: usize, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    let formatted = match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => c_special(value).unwrap_or(raw),
    };
    format!("{:>width$}", formatted, width = width)
}

/// C-style `%W.Pf`.
fn format_fixed(value: f64, width: usize, precision: usize) -> String {
    let formatted = match c_special(value) {
        Some(s) => s,
        None => format!("{:.*}", precision, value),
    };
    format!("{:>width$}", formatted, width = width)
}

fn c_special(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("nan".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

/// True when the whole matrix should be printed in scientific notation.
pub fn uses_scientific(m: &Matrix, threshold: f64) -> bool {
    let min = m
        .as_slice()
        .iter()
        .map(|v| v.abs())
        .filter(|&v| v != 0.0)
        .fold(f64::INFINITY, |acc, v| if v < acc { v } else { acc });
    min < threshold
}

/// Render `m` exactly as `Matrix::print_with` writes it.
pub fn render(m: &Matrix, format: &PrintFormat) -> String {
    let scientific = uses_scientific(m, format.scientific_threshold);
    let mut out = String::new();
    for i in 0..m.nrows() {
        for &value in m.row_slice(i) {
            let cell = if scientific {
                format_scientific(value, format.scientific_width, format.precision)
            } else {
                format_fixed(value, format.fixed_width, format.precision)
            };
            out.push_str(&cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

impl Matrix {
    /// Write the matrix in the default layout (`%11.6f` or `%14.6e`).
    pub fn print<W: Write>(&self, writer: W) -> io::Result<()> {
        self.print_with(writer, &PrintFormat::default())
    }

    pub fn print_with<W: Write>(&self, mut writer: W, format: &PrintFormat) -> io::Result<()> {
        writer.write_all(render(self, format).as_bytes())
    }

    /// Fill the matrix row-major from `reader`, failing on short or malformed
    /// input.
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<(), MatrixError> {
        self.read_with(reader, ReadPolicy::Strict).map(|_| ())
    }

    /// Fill the matrix row-major from `reader` and return how many values
    /// were stored.
    ///
    /// Under [`ReadPolicy::Lenient`] reading stops quietly at the first
    /// missing or malformed value; cells that were not reached keep their
    /// previous contents.
    pub fn read_with<R: BufRead>(&mut self, reader: R, policy: ReadPolicy) -> Result<usize, MatrixError> {
        let expected = self.nrows() * self.ncols();
        let mut tokens = TokenReader::new(reader);
        let cells = self.as_mut_slice();
        for (index, cell) in cells.iter_mut().enumerate() {
            let failure = match tokens.next_token()? {
                Some(token) => match token.parse::<f64>() {
                    Ok(value) => {
                        *cell = value;
                        continue;
                    }
                    Err(_) => MatrixError::InvalidToken { index, token },
                },
                None => MatrixError::UnexpectedEof {
                    expected,
                    found: index,
                },
            };
            return match policy {
                ReadPolicy::Strict => Err(failure),
                ReadPolicy::Lenient => {
                    log::warn!("Stopped reading matrix after {} of {} values: {}", index, expected, failure);
                    Ok(index)
                }
            };
        }
        Ok(expected)
    }

    /// Allocate an `nrows x ncols` matrix and read its values from `reader`.
    pub fn from_reader<R: BufRead>(reader: R, nrows: usize, ncols: usize) -> Result<Matrix, MatrixError> {
        let mut m = Matrix::new(nrows, ncols);
        m.read(reader)?;
        Ok(m)
    }
}
