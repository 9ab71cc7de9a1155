//! Standings table as CSV.

use crate::models::{ChampionshipStanding, SeasonError};

/// CSV with header `rank,name,c1..cN,total`, rows in the given order.
pub fn standings_to_csv(standings: &[ChampionshipStanding]) -> Result<String, SeasonError> {
    let competitions = standings
        .iter()
        .map(|s| s.points_per_competition.len())
        .max()
        .unwrap_or(0);
    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_err = |e: csv::Error| SeasonError::Serialization(e.to_string());

    let mut header = vec!["rank".to_string(), "name".to_string()];
    header.extend((1..=competitions).map(|i| format!("c{i}")));
    header.push("total".to_string());
    writer.write_record(&header).map_err(to_err)?;

    for (i, s) in standings.iter().enumerate() {
        let mut row = vec![(i + 1).to_string(), s.name.clone()];
        row.extend(s.points_per_competition.iter().map(f64::to_string));
        row.resize(competitions + 2, String::new());
        row.push(s.total_points().to_string());
        writer.write_record(&row).map_err(to_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SeasonError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SeasonError::Serialization(e.to_string()))
}
