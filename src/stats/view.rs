use log::trace;
use crate::format::format_delta_time;
use crate::viewers::AggregateStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsField {
    Stats,
    TimeReport,
    ViewersReport,
}

/// Summary strings shown above the roster.
#[derive(Debug, Default)]
pub struct StatsView {
    stats: Option<AggregateStats>,
}

impl StatsView {
    pub fn stats(&self) -> Option<&AggregateStats> {
        self.stats.as_ref()
    }

    /// Stores fresh stats and returns the display fields that changed.
    pub fn update(&mut self, stats: AggregateStats) -> Vec<StatsField> {
        if self.stats == Some(stats) {
            return Vec::new();
        }
        let old_time = self.time_report();
        let old_viewers = self.viewers_report();
        self.stats = Some(stats);

        let mut changed = vec![StatsField::Stats];
        if self.time_report() != old_time {
            changed.push(StatsField::TimeReport);
        }
        if self.viewers_report() != old_viewers {
            changed.push(StatsField::ViewersReport);
        }
        trace!("Stats changed: {:?}", changed);
        changed
    }

    /// "<this session> / <all time>" total view time.
    pub fn time_report(&self) -> String {
        match &self.stats {
            Some(stats) => format!(
                "{} / {}",
                format_delta_time(stats.total_view_seconds_this_session),
                format_delta_time(stats.total_view_seconds_all_time)
            ),
            None => String::new(),
        }
    }

    /// "<current> / <max this session> / <max all time>" viewer counts.
    pub fn viewers_report(&self) -> String {
        match &self.stats {
            Some(stats) => format!(
                "{} / {} / {}",
                stats.current_viewer_count,
                stats.max_viewer_count_this_session,
                stats.max_viewer_count_all_time
            ),
            None => String::new(),
        }
    }
}
