use std::{
    convert::TryFrom,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::{
    attribute::{Attribute, AttributeBuilder},
    pretreat::{Pretreat, Transformer},
    Error, Result,
};

/// One row of values, positionally aligned with the attributes.
pub type Record = Vec<String>;

/// Read-only view of a loaded table: attributes with their value statistics
/// and the accepted records.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    name: Option<String>,
    attributes: Vec<Attribute>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn builder<I, S>(names: I) -> DatasetBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DatasetBuilder {
            attrs: names.into_iter().map(AttributeBuilder::new).collect(),
            records: Vec::new(),
            dropped: 0,
        }
    }

    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut ds = Self::try_from(File::open(path)?)?;
        ds.name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        Ok(ds)
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse(lines.into_iter().map(|s| Ok(s.as_ref().to_string())))
    }

    fn parse<I: Iterator<Item = io::Result<String>>>(lines: I) -> Result<Self> {
        let mut builder: Option<DatasetBuilder> = None;
        for (lineno, line) in lines.enumerate() {
            let line = line?;
            let fields = tokenize(&line, builder.is_some());
            if fields.is_empty() {
                continue;
            }
            match builder.as_mut() {
                None => builder = Some(Self::builder(fields)),
                Some(b) => {
                    let n = fields.len();
                    if !b.push(fields) {
                        log::warn!(
                            "line {}: expected {} fields, got {n}; record dropped",
                            lineno + 1,
                            b.num_attributes()
                        );
                    }
                }
            }
        }
        let ds = builder.ok_or(Error::EmptyHeader)?.build();
        Ok(ds)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(Attribute::name).collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn num_instances(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attribute statistics after pretreatment. Attributes past the end of
    /// `pretreat` are returned unchanged.
    pub fn pretreat_attributes(&self, pretreat: &[Pretreat]) -> Result<Vec<Attribute>> {
        self.attributes
            .iter()
            .enumerate()
            .map(|(i, attr)| match pretreat.get(i) {
                Some(p) => attr.pretreat(p),
                None => Ok(attr.clone()),
            })
            .collect()
    }

    /// Records with every value pretreated.
    pub fn pretreat_records(&self, pretreat: &[Pretreat]) -> Result<Vec<Record>> {
        self.records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .enumerate()
                    .map(|(i, value)| match pretreat.get(i) {
                        Some(p) => p.transform(value).map(|v| v.into_owned()),
                        None => Ok(value.clone()),
                    })
                    .collect::<Result<Record>>()
            })
            .collect()
    }
}

impl TryFrom<File> for Dataset {
    type Error = Error;

    fn try_from(file: File) -> Result<Self> {
        Self::parse(BufReader::new(file).lines())
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_lines(s.lines())
    }
}

/// Collects records during a single ingestion pass; [`DatasetBuilder::build`]
/// freezes the attribute statistics.
#[derive(Debug)]
pub struct DatasetBuilder {
    attrs: Vec<AttributeBuilder>,
    records: Vec<Record>,
    dropped: usize,
}

impl DatasetBuilder {
    pub fn num_attributes(&self) -> usize {
        self.attrs.len()
    }

    /// Appends `record` if it has one value per attribute, returns whether
    /// it was accepted.
    pub fn push<S: Into<String>>(&mut self, record: impl IntoIterator<Item = S>) -> bool {
        let record: Record = record.into_iter().map(Into::into).collect();
        if record.len() != self.attrs.len() {
            self.dropped += 1;
            return false;
        }
        for (attr, value) in self.attrs.iter_mut().zip(&record) {
            attr.append(value);
        }
        self.records.push(record);
        true
    }

    pub fn build(self) -> Dataset {
        log::info!(
            "read dataset (attributes: {}, records: {}, dropped: {})",
            self.attrs.len(),
            self.records.len(),
            self.dropped
        );
        Dataset {
            name: None,
            attributes: self.attrs.into_iter().map(AttributeBuilder::freeze).collect(),
            records: self.records,
        }
    }
}

/// Splits a line on commas and whitespace. `%` starts a comment, `"` and `'`
/// quote a token verbatim. With `numeric`, unquoted numbers are reduced to
/// their integer part; header lines are split with it off.
fn tokenize(line: &str, numeric: bool) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => break,
            '"' | '\'' => {
                flush(&mut current, &mut tokens, numeric);
                tokens.push(chars.by_ref().take_while(|&q| q != c).collect());
            }
            ',' => flush(&mut current, &mut tokens, numeric),
            c if c.is_whitespace() => flush(&mut current, &mut tokens, numeric),
            c => current.push(c),
        }
    }
    flush(&mut current, &mut tokens, numeric);
    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>, numeric: bool) {
    if !current.is_empty() {
        tokens.push(if numeric { normalize(current) } else { current.clone() });
        current.clear();
    }
}

/// Integer part of a numeric token; tokens outside the `i64` range are kept.
fn normalize(token: &str) -> String {
    match token.parse::<f64>().map(f64::trunc) {
        Ok(n) if n >= i64::MIN as f64 && n < i64::MAX as f64 => format!("{}", n as i64),
        _ => token.to_string(),
    }
}
