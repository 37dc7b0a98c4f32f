use crate::model::ReportData;

/// Render the report as pretty-printed JSON.
pub fn render_json_report(data: &ReportData) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Pyramid, SlotId};
    use crate::model::build_report_data;
    use crate::solve::propagate;

    #[test]
    fn report_round_trips_through_json_value() {
        let mut p = Pyramid::build(2, [(SlotId::ROOT, 6.0), (SlotId::new(1, 0), 4.0)]).unwrap();
        let c = propagate(&mut p).unwrap();
        let json = render_json_report(&build_report_data(&p, &c)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["status"], "solved");
        assert_eq!(v["rows"][1][1], 9.0);
        assert_eq!(v["sweeps"][0]["order"], "top_down");
        assert_eq!(v["sweeps"][0]["assignments"][0]["rule"], "right_child");
        assert_eq!(v["sweeps"][0]["assignments"][0]["slot"]["col"], 1);
    }
}
