// Display sink: where the aggregated line ends up.

use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

/// How [`WriterSink`] renders each published line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The bare text, one line per tick.
    #[default]
    Plain,
    /// One JSON object per tick (`text`, `color`, `align`), for status bars that take JSON.
    Json,
}

/// Single-line display element owned by the polling loop.
pub trait DisplaySink: Send {
    /// (Re)create the element with the given alignment. Called before the first `show`.
    fn create_element(&mut self, alignment: Alignment) -> anyhow::Result<()>;
    fn set_color(&mut self, color: &str) -> anyhow::Result<()>;
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
    fn show(&mut self) -> anyhow::Result<()>;
    fn dispose(&mut self) -> anyhow::Result<()>;
}

#[derive(Serialize)]
struct JsonLine<'a> {
    text: &'a str,
    color: &'a str,
    align: Alignment,
}

/// Writes one line per published text to any `Write` (stdout in the binary).
/// Text set while the element is hidden or disposed is kept but not written.
pub struct WriterSink<W: Write + Send> {
    out: W,
    format: OutputFormat,
    alignment: Alignment,
    color: String,
    text: String,
    visible: bool,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            alignment: Alignment::Right,
            color: crate::config::DEFAULT_COLOR.into(),
            text: String::new(),
            visible: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_line(&mut self) -> anyhow::Result<()> {
        if !self.visible {
            return Ok(());
        }
        match self.format {
            OutputFormat::Plain => writeln!(self.out, "{}", self.text)?,
            OutputFormat::Json => {
                let line = JsonLine {
                    text: &self.text,
                    color: &self.color,
                    align: self.alignment,
                };
                serde_json::to_writer(&mut self.out, &line)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write + Send> DisplaySink for WriterSink<W> {
    fn create_element(&mut self, alignment: Alignment) -> anyhow::Result<()> {
        self.alignment = alignment;
        self.visible = false;
        Ok(())
    }

    fn set_color(&mut self, color: &str) -> anyhow::Result<()> {
        self.color = color.to_string();
        Ok(())
    }

    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.text = text.to_string();
        self.flush_line()
    }

    fn show(&mut self) -> anyhow::Result<()> {
        self.visible = true;
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.visible = false;
        self.out.flush()?;
        Ok(())
    }
}
