use crate::charts::{
    ChartDefinition,
    ChartUpdate,
};
use eyre::{
    Context as _,
    Result,
};
use std::io::{
    self,
    Write,
};

/// Where chart definitions and samples end up.
pub trait MetricsSink: Send {
    fn register_chart(&mut self, chart: &ChartDefinition) -> Result<()>;

    /// Submits one sample per dimension of `update.chart`.
    fn submit(&mut self, update: &ChartUpdate) -> Result<()>;

    /// Tells the host there is nothing to collect.
    fn disable(&mut self) -> Result<()>;
}

/// Speaks the external plugin text protocol of the monitoring agent:
///
/// ```text
/// CHART multichain_node1.blocks 'blocks' 'Block count' 'blocks' 'blocks' 'multichain.blocks' line 60001 5
/// DIMENSION 'blocks' 'blocks' absolute 1 1
/// BEGIN multichain_node1.blocks
/// SET blocks = 100
/// END
/// ```
pub struct PluginProtocolSink<W> {
    writer: W,
}

impl PluginProtocolSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PluginProtocolSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> MetricsSink for PluginProtocolSink<W> {
    fn register_chart(&mut self, chart: &ChartDefinition) -> Result<()> {
        writeln!(
            self.writer,
            "CHART {} {} {} {} {} {} {} {} {}",
            chart.id,
            quote(&chart.name),
            quote(&chart.title),
            quote(&chart.units),
            quote(&chart.family),
            quote(&chart.context),
            chart.chart_type,
            chart.priority,
            chart.update_every,
        )?;
        for dimension in &chart.dimensions {
            write!(
                self.writer,
                "DIMENSION {} {} {} {} {}",
                quote(&dimension.id),
                quote(&dimension.name),
                dimension.algorithm,
                dimension.multiplier,
                dimension.divisor,
            )?;
            if dimension.hidden {
                write!(self.writer, " hidden")?;
            }
            writeln!(self.writer)?;
        }
        self.writer
            .flush()
            .wrap_err_with(|| format!("Failed to register chart {}", chart.id))
    }

    fn submit(&mut self, update: &ChartUpdate) -> Result<()> {
        writeln!(self.writer, "BEGIN {}", update.chart.id)?;
        for (dimension, value) in &update.values {
            writeln!(self.writer, "SET {dimension} = {value}")?;
        }
        writeln!(self.writer, "END")?;
        self.writer
            .flush()
            .wrap_err_with(|| format!("Failed to submit values of chart {}", update.chart.id))
    }

    fn disable(&mut self) -> Result<()> {
        writeln!(self.writer, "DISABLE")?;
        self.writer.flush().context("Failed to disable the plugin")
    }
}

/// Single quotes delimit words in the protocol, so they cannot appear inside one.
fn quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', "_"))
}
