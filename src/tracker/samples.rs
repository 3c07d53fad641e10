//! Fixed sample rows and dropdown lists written into a fresh tracker.

/// One row of the Post Performance sheet: raw counters only.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceRow {
    pub post_id: &'static str,
    pub date: (u16, u8, u8),
    pub vertical: &'static str,
    pub pain_point: &'static str,
    pub post_type: &'static str,
    pub impressions: u32,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    pub dms: u32,
    pub videos_sent: u32,
    pub demos_booked: u32,
    pub notes: &'static str,
}

/// One row of the Response Tracker sheet.
#[derive(Debug, Clone, Copy)]
pub struct ProspectRow {
    pub prospect: &'static str,
    pub vertical: &'static str,
    pub post_id: &'static str,
    pub engage_type: &'static str,
    pub engaged: (u16, u8, u8),
    pub video_sent: Option<(u16, u8, u8)>,
    pub demo_date: Option<(u16, u8, u8)>,
    pub status: &'static str,
}

pub const VERTICALS: [&str; 5] = ["Electrical", "HVAC", "Plumbing", "Energy", "Multi-Vertical"];

pub const PAIN_POINTS: [&str; 5] = [
    "Material Cost Overruns",
    "Labor Burden Blindness",
    "Admin Time Waste",
    "Cash Flow Delays",
    "Job Profitability Opacity",
];

pub const POST_TYPES: [&str; 5] = [
    "Hand-Raiser",
    "Educational",
    "Case Study",
    "Poll/Survey",
    "Testimonial",
];

#[rustfmt::skip]
pub const PERFORMANCE_ROWS: [PerformanceRow; 6] = [
    PerformanceRow { post_id: "EC-001", date: (2025, 1, 13), vertical: "Electrical", pain_point: "Material Cost Overruns", post_type: "Hand-Raiser",
        impressions: 1247, likes: 63, comments: 8, shares: 2, dms: 5, videos_sent: 5, demos_booked: 2, notes: "High engagement on copper price spike" },
    PerformanceRow { post_id: "EC-002", date: (2025, 1, 15), vertical: "Electrical", pain_point: "Labor Burden", post_type: "Hand-Raiser",
        impressions: 892, likes: 34, comments: 3, shares: 1, dms: 2, videos_sent: 2, demos_booked: 0, notes: "Lower engagement, may need refinement" },
    PerformanceRow { post_id: "HV-001", date: (2025, 1, 15), vertical: "HVAC", pain_point: "Labor Burden Blindness", post_type: "Hand-Raiser",
        impressions: 1583, likes: 87, comments: 12, shares: 4, dms: 8, videos_sent: 7, demos_booked: 3, notes: "Strong resonance on \"80% done\" angle" },
    PerformanceRow { post_id: "PL-001", date: (2025, 1, 17), vertical: "Plumbing", pain_point: "Admin Time Waste", post_type: "Hand-Raiser",
        impressions: 1129, likes: 56, comments: 6, shares: 2, dms: 4, videos_sent: 4, demos_booked: 1, notes: "Office manager empathy angle worked" },
    PerformanceRow { post_id: "HV-002", date: (2025, 1, 20), vertical: "HVAC", pain_point: "Material Cost Overruns", post_type: "Hand-Raiser",
        impressions: 743, likes: 28, comments: 2, shares: 0, dms: 1, videos_sent: 1, demos_booked: 0, notes: "Cross-tested electrical pain point, lower fit" },
    PerformanceRow { post_id: "EC-003", date: (2025, 1, 22), vertical: "Electrical", pain_point: "Cash Flow Delays", post_type: "Educational",
        impressions: 1034, likes: 41, comments: 5, shares: 1, dms: 3, videos_sent: 3, demos_booked: 1, notes: "Testing new pain point angle" },
];

#[rustfmt::skip]
pub const PROSPECT_ROWS: [ProspectRow; 4] = [
    ProspectRow { prospect: "John Smith", vertical: "Electrical", post_id: "EC-001", engage_type: "Comment",
        engaged: (2025, 1, 13), video_sent: Some((2025, 1, 13)), demo_date: Some((2025, 1, 18)), status: "Demo Booked" },
    ProspectRow { prospect: "Mike Johnson", vertical: "HVAC", post_id: "HV-001", engage_type: "DM",
        engaged: (2025, 1, 15), video_sent: Some((2025, 1, 15)), demo_date: Some((2025, 1, 20)), status: "Demo Booked" },
    ProspectRow { prospect: "Sarah Williams", vertical: "Plumbing", post_id: "PL-001", engage_type: "Comment",
        engaged: (2025, 1, 17), video_sent: Some((2025, 1, 18)), demo_date: None, status: "Video Sent" },
    ProspectRow { prospect: "Dave Martinez", vertical: "Electrical", post_id: "EC-001", engage_type: "DM",
        engaged: (2025, 1, 13), video_sent: None, demo_date: None, status: "Engaged" },
];
