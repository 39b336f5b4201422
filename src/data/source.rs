use anyhow::Result;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::dataset::TournamentData;
use crate::domain::TournamentKey;
use crate::error::AppError;
use crate::utils::app_time;

pub trait DatasetSource: Send + Sync {
    // Either load the tournament's files OR return an anyhow::Error
    fn load_tournament(&self, key: TournamentKey) -> Result<TournamentData>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Tries each source in turn and returns the first success with its signature.
pub fn load_tournament_data(
    sources: &[Box<dyn DatasetSource>],
    key: TournamentKey,
) -> Result<(TournamentData, &'static str), AppError> {
    let mut failures = Vec::new();

    for source in sources {
        let start = app_time::now();
        match source.load_tournament(key) {
            Ok(data) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_dataset_loading {
                    log::info!(
                        "Loaded {} from {}: {} matches, {} points in {} ms",
                        key,
                        source.signature(),
                        data.match_count(),
                        data.total_points(),
                        app_time::elapsed_ms(start)
                    );
                }
                #[cfg(not(debug_assertions))]
                let _ = start;
                return Ok((data, source.signature()));
            }
            Err(e) => {
                log::info!("{} could not load {}: {:#}", source.signature(), key, e);
                failures.push(format!("{}: {:#}", source.signature(), e));
                // Continue to the next source
            }
        }
    }

    Err(AppError::Dataset(if failures.is_empty() {
        format!("no data source is configured for {}", key)
    } else {
        format!("{} ({})", key, failures.join("; "))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tournament;
    use anyhow::bail;

    struct Failing;
    impl DatasetSource for Failing {
        fn load_tournament(&self, key: TournamentKey) -> Result<TournamentData> {
            bail!("nothing here for {}", key)
        }
        fn signature(&self) -> &'static str {
            "Failing"
        }
    }

    struct Tiny;
    impl DatasetSource for Tiny {
        fn load_tournament(&self, key: TournamentKey) -> Result<TournamentData> {
            TournamentData::from_readers(
                key,
                "match_id,SetNo,GameNo,PointNumber,PointWinner\nm,1,1,1,1\n".as_bytes(),
                "match_id,player1,player2\nm,Aa Bb,Cc Dd\n".as_bytes(),
            )
        }
        fn signature(&self) -> &'static str {
            "Tiny"
        }
    }

    #[test]
    fn falls_back_to_next_source() {
        let sources: Vec<Box<dyn DatasetSource>> = vec![Box::new(Failing), Box::new(Tiny)];
        let key = TournamentKey::new(Tournament::UsOpen, 2015);
        let (data, signature) = load_tournament_data(&sources, key).unwrap();
        assert_eq!(signature, "Tiny");
        assert_eq!(data.match_count(), 1);
    }

    #[test]
    fn all_failures_become_dataset_error() {
        let sources: Vec<Box<dyn DatasetSource>> = vec![Box::new(Failing)];
        let key = TournamentKey::new(Tournament::UsOpen, 2015);
        let err = load_tournament_data(&sources, key).unwrap_err();
        assert_eq!(err.title(), "Dataset unavailable");
        assert!(err.to_string().contains("nothing here"));
        assert!(load_tournament_data(&[], key).is_err());
    }
}
