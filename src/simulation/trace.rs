//! Sampled trajectory of a simulation run

use std::io::Write;

use serde::Serialize;

/// State of the model at one sample time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub income: f64,
    pub consumption: f64,
    pub savings: f64,
}

/// Samples at `t = 0, dt, 2·dt, ...` up to the last whole step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationTrace {
    samples: Vec<Sample>,
}

impl SimulationTrace {
    pub(crate) fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Savings at the last sample
    pub fn final_savings(&self) -> f64 {
        self.last().map_or(f64::NAN, |s| s.savings)
    }

    /// Time of the last sample
    pub fn end_time(&self) -> f64 {
        self.last().map_or(0.0, |s| s.time)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn savings(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.savings)
    }

    /// Write one CSV row per sample
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for sample in &self.samples {
            wtr.serialize(sample)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SimulationTrace {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
