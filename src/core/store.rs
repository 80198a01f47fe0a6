use crate::core::billing;
use crate::core::codec;
use crate::core::query::{find_by_name, sort_boats};
use crate::domain::model::{BoatRecord, RateTable, MAX_BOATS};
use crate::utils::error::{MarinaError, PaymentError, Result, StoreError};
use std::io::{Read, Write};

/// A data-file line that was not loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

/// The marina's boat inventory, kept sorted by name (ignoring case) with
/// unique names and at most `capacity` boats.
#[derive(Debug, Clone)]
pub struct Marina {
    boats: Vec<BoatRecord>,
    capacity: usize,
}

impl Default for Marina {
    fn default() -> Self {
        Self::new()
    }
}

impl Marina {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BOATS)
    }

    /// Creates an empty marina holding at most `capacity` boats, never more
    /// than [`MAX_BOATS`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_BOATS);
        Self {
            boats: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// Current boats in name order.
    pub fn list(&self) -> &[BoatRecord] {
        &self.boats
    }

    pub fn find(&self, name: &str) -> Option<&BoatRecord> {
        find_by_name(&self.boats, name).map(|index| &self.boats[index])
    }

    fn check_insertable(&self, record: &BoatRecord) -> std::result::Result<(), StoreError> {
        if self.boats.len() >= self.capacity {
            return Err(StoreError::AtCapacity {
                capacity: self.capacity,
            });
        }
        record.validate()?;
        if find_by_name(&self.boats, &record.name).is_some() {
            return Err(StoreError::DuplicateName {
                name: record.name.clone(),
            });
        }
        Ok(())
    }

    pub fn add(&mut self, record: BoatRecord) -> std::result::Result<(), StoreError> {
        if let Err(e) = self.check_insertable(&record) {
            tracing::warn!("Rejected boat '{}': {}", record.name, e);
            return Err(e);
        }
        tracing::info!("Added boat '{}'", record.name);
        self.boats.push(record);
        sort_boats(&mut self.boats);
        Ok(())
    }

    /// Parses one data-file style line and adds the resulting boat.
    pub fn add_line(&mut self, line: &str) -> Result<()> {
        let record = codec::parse_line(line)?;
        self.add(record)?;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> std::result::Result<BoatRecord, StoreError> {
        let index = find_by_name(&self.boats, name).ok_or_else(|| StoreError::NotFound {
            name: name.to_string(),
        })?;
        let removed = self.boats.remove(index);
        sort_boats(&mut self.boats);
        tracing::info!("Removed boat '{}'", removed.name);
        Ok(removed)
    }

    pub fn apply_monthly_charges(&mut self, rates: &RateTable) {
        billing::apply_monthly_charges(&mut self.boats, rates);
        tracing::info!("Applied monthly charges to {} boats", self.boats.len());
    }

    /// Takes a payment against the named boat and returns its new balance.
    pub fn accept_payment(
        &mut self,
        name: &str,
        amount: f64,
    ) -> std::result::Result<f64, PaymentError> {
        let index = find_by_name(&self.boats, name).ok_or_else(|| PaymentError::NotFound {
            name: name.to_string(),
        })?;
        let boat = &mut self.boats[index];
        let balance = billing::accept_payment(boat, amount)?;
        tracing::info!(
            "Accepted ${:.2} from '{}', balance ${:.2}",
            amount,
            boat.name,
            balance
        );
        Ok(balance)
    }

    /// Reads data-file lines from `source` into the marina.
    ///
    /// Lines that fail to parse, break a range rule, repeat a name, or arrive
    /// once the marina is full are skipped and listed in the report. Only an
    /// I/O failure of the source itself aborts the load; boats read before the
    /// failure stay in the marina, still sorted.
    pub fn load<R: Read>(&mut self, source: R) -> Result<LoadReport> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(source);

        let mut report = LoadReport::default();
        for result in reader.records() {
            let fields = match result {
                Ok(fields) => fields,
                Err(e) if e.is_io_error() => {
                    sort_boats(&mut self.boats);
                    tracing::error!(
                        "Load aborted after {} boats: {}",
                        report.loaded,
                        e
                    );
                    return Err(MarinaError::CsvError(e));
                }
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    skip(&mut report, line, e.to_string());
                    continue;
                }
            };
            let line = fields.position().map(|p| p.line()).unwrap_or(0);

            let outcome = codec::parse_fields(fields.iter())
                .map_err(MarinaError::from)
                .and_then(|record| {
                    self.check_insertable(&record)?;
                    Ok(record)
                });
            match outcome {
                Ok(record) => {
                    self.boats.push(record);
                    report.loaded += 1;
                }
                Err(e) => skip(&mut report, line, e.to_string()),
            }
        }

        sort_boats(&mut self.boats);
        tracing::info!(
            "Loaded {} boats, skipped {} lines",
            report.loaded,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Writes every boat to `sink`, one line each, and returns how many were
    /// written. Each line is flushed before the next, so a failure part way
    /// leaves the earlier lines in place.
    pub fn save<W: Write>(&self, sink: W) -> Result<usize> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(sink);

        for (written, boat) in self.boats.iter().enumerate() {
            let outcome = writer
                .write_record(codec::to_fields(boat))
                .map_err(MarinaError::from)
                .and_then(|_| writer.flush().map_err(MarinaError::from));
            if let Err(e) = outcome {
                tracing::error!(
                    "Error writing data for boat '{}' after {} records: {}",
                    boat.name,
                    written,
                    e
                );
                return Err(e);
            }
        }

        tracing::debug!("Saved {} boats", self.boats.len());
        Ok(self.boats.len())
    }
}

fn skip(report: &mut LoadReport, line: u64, reason: String) {
    tracing::warn!("Skipping line {}: {}", line, reason);
    report.skipped.push(SkippedLine { line, reason });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::is_sorted;
    use crate::domain::model::Location;

    fn boat(name: &str) -> BoatRecord {
        BoatRecord::new(name, 20, Location::Slip(10), 0.0).unwrap()
    }

    fn names(marina: &Marina) -> Vec<&str> {
        marina.list().iter().map(|b| b.name.as_str()).collect()
    }

    /// A sink that accepts a fixed number of writes and then fails.
    struct FailingSink {
        data: Vec<u8>,
        writes_left: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.writes_left == 0 {
                return Err(std::io::Error::other("disk full"));
            }
            self.writes_left -= 1;
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_keeps_names_sorted() {
        let mut marina = Marina::new();
        marina.add(boat("pirate")).unwrap();
        marina.add(boat("Jolly")).unwrap();
        marina.add(boat("big brother")).unwrap();

        assert_eq!(names(&marina), vec!["big brother", "Jolly", "pirate"]);
        assert!(marina.find("JOLLY").is_some());
    }

    #[test]
    fn test_add_rejects_duplicate_name_ignoring_case() {
        let mut marina = Marina::new();
        marina.add(boat("Jolly")).unwrap();

        let err = marina.add(boat("jOLLY")).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateName {
                name: "jOLLY".to_string()
            }
        );
        assert_eq!(names(&marina), vec!["Jolly"]);
    }

    #[test]
    fn test_add_rejects_invalid_record() {
        let mut marina = Marina::new();
        let mut record = boat("Jolly");
        record.location = Location::Slip(99);

        assert!(matches!(marina.add(record), Err(StoreError::InvalidField(_))));
        assert!(marina.is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let mut marina = Marina::new();
        for i in 0..MAX_BOATS {
            marina.add(boat(&format!("Boat {:03}", i))).unwrap();
        }
        assert_eq!(marina.len(), MAX_BOATS);

        let err = marina.add(boat("One Too Many")).unwrap_err();
        assert_eq!(err, StoreError::AtCapacity { capacity: MAX_BOATS });
        assert_eq!(marina.len(), MAX_BOATS);
        assert!(marina.find("One Too Many").is_none());
    }

    #[test]
    fn test_capacity_never_exceeds_max() {
        let marina = Marina::with_capacity(500);
        assert_eq!(marina.capacity(), MAX_BOATS);
    }

    #[test]
    fn test_remove() {
        let mut marina = Marina::new();
        for name in ["Jolly", "Moby", "Pirate"] {
            marina.add(boat(name)).unwrap();
        }

        let removed = marina.remove("moby").unwrap();
        assert_eq!(removed.name, "Moby");
        assert_eq!(marina.len(), 2);
        assert!(marina.find("Moby").is_none());
        assert!(is_sorted(marina.list()));

        let err = marina.remove("Moby").unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                name: "Moby".to_string()
            }
        );
        assert_eq!(marina.len(), 2);
    }

    #[test]
    fn test_add_line() {
        let mut marina = Marina::new();
        marina.add_line("Jolly,20,slip,10,50.00").unwrap();
        assert_eq!(marina.list()[0].location, Location::Slip(10));

        assert!(matches!(
            marina.add_line("Jolly,20,slip"),
            Err(MarinaError::Parse(_))
        ));
        assert!(matches!(
            marina.add_line("JOLLY,20,land,A,0"),
            Err(MarinaError::Store(StoreError::DuplicateName { .. }))
        ));
        assert_eq!(marina.len(), 1);
    }

    #[test]
    fn test_accept_payment_by_name() {
        let mut marina = Marina::new();
        marina.add_line("Jolly,20,slip,10,50.00").unwrap();

        assert_eq!(marina.accept_payment("jolly", 20.0).unwrap(), 30.0);
        assert!(matches!(
            marina.accept_payment("Jolly", 30.01),
            Err(PaymentError::ExceedsOwed { .. })
        ));
        assert!(matches!(
            marina.accept_payment("Nobody", 1.0),
            Err(PaymentError::NotFound { .. })
        ));
        assert_eq!(marina.find("Jolly").unwrap().amount_owed, 30.0);
    }

    #[test]
    fn test_load_skips_invalid_lines() {
        let data = "Zed,30,slip,12,0.00\n\
                    Bad Slip,20,slip,99,10.00\n\
                    Alpha,12,land,C,5.50\n\
                    alpha,14,storage,2,0.00\n\
                    garbage line\n";
        let mut marina = Marina::new();
        let report = marina.load(data.as_bytes()).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(names(&marina), vec!["Alpha", "Zed"]);
        let skipped: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![2, 4, 5]);
        assert!(report.skipped[0].reason.contains("slip number"));
        assert!(report.skipped[1].reason.contains("already exists"));
    }

    #[test]
    fn test_load_ignores_blank_lines() {
        let data = "Jolly,20,slip,10,50.00\n\nMoby,4,trailor,X1234,0.00\r\n\r\n";
        let mut marina = Marina::new();
        let report = marina.load(data.as_bytes()).unwrap();

        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_load_failure_keeps_earlier_boats_sorted() {
        struct BrokenSource {
            data: Option<&'static [u8]>,
        }

        impl Read for BrokenSource {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                match self.data.take() {
                    Some(data) => {
                        buf[..data.len()].copy_from_slice(data);
                        Ok(data.len())
                    }
                    None => Err(std::io::Error::other("device unplugged")),
                }
            }
        }

        let mut marina = Marina::new();
        let result = marina.load(BrokenSource {
            data: Some(b"Zed,30,slip,12,0.00\nAlpha,12,land,C,5.50\n"),
        });

        assert!(matches!(result, Err(MarinaError::CsvError(_))));
        assert_eq!(names(&marina), vec!["Alpha", "Zed"]);
    }

    #[test]
    fn test_boats_at_field_limits_survive_save_and_load() {
        let mut marina = Marina::new();
        marina
            .add(BoatRecord::new("Short Tag", 10, Location::trailer("T"), 0.0).unwrap())
            .unwrap();
        marina
            .add(BoatRecord::new("Full Tag", 10, Location::trailer("123456789"), 0.0).unwrap())
            .unwrap();
        marina
            .add(BoatRecord::new("n".repeat(127), 10, Location::Slip(1), 0.0).unwrap())
            .unwrap();
        marina
            .add(BoatRecord::new("In Credit", 10, Location::Land('A'), -42.5).unwrap())
            .unwrap();
        assert!(marina
            .add(BoatRecord {
                name: "No Tag".to_string(),
                length: 10,
                location: Location::Trailer(String::new()),
                amount_owed: 0.0,
            })
            .is_err());

        let mut buffer = Vec::new();
        marina.save(&mut buffer).unwrap();
        let mut reloaded = Marina::new();
        let report = reloaded.load(buffer.as_slice()).unwrap();

        assert!(report.skipped.is_empty());
        assert_eq!(reloaded.list(), marina.list());
    }

    #[test]
    fn test_load_respects_capacity() {
        let data: String = (0..5)
            .map(|i| format!("Boat {},10,storage,{},0.00\n", i, i + 1))
            .collect();
        let mut marina = Marina::with_capacity(3);
        let report = marina.load(data.as_bytes()).unwrap();

        assert_eq!(report.loaded, 3);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(marina.len(), 3);
    }

    #[test]
    fn test_save_then_load() {
        let mut marina = Marina::new();
        marina.add_line("Pirate,23,land,B,0").unwrap();
        marina.add_line("Jolly,20,slip,10,50").unwrap();
        marina.add_line("Moby,4,trailor,X1234,16.5").unwrap();

        let mut buffer = Vec::new();
        assert_eq!(marina.save(&mut buffer).unwrap(), 3);
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert_eq!(
            text,
            "Jolly,20,slip,10,50.00\nMoby,4,trailor,X1234,16.50\nPirate,23,land,B,0.00\n"
        );

        let mut reloaded = Marina::new();
        reloaded.load(buffer.as_slice()).unwrap();
        assert_eq!(reloaded.list(), marina.list());
    }

    #[test]
    fn test_save_failure_keeps_written_lines() {
        let mut marina = Marina::new();
        marina.add_line("Alpha,10,slip,1,0").unwrap();
        marina.add_line("Bravo,10,slip,2,0").unwrap();
        marina.add_line("Charlie,10,slip,3,0").unwrap();

        let mut sink = FailingSink {
            data: Vec::new(),
            writes_left: 1,
        };
        let result = marina.save(&mut sink);

        assert!(result.is_err());
        assert_eq!(String::from_utf8(sink.data).unwrap(), "Alpha,10,slip,1,0.00\n");
    }
}
