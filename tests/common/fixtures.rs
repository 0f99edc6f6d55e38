//! Static CSV corpora used across harnesses.
//!
//! Rows follow the export layout `status, DD/MM/YYYY  HH:MM:SS, time, desc,
//! location`, with the two-space timestamp separator found in real exports.

/// The worked example row.
pub const SAMPLE_ROW: [&str; 5] = ["OK", "01/03/2020  10:15:30", "10.150.000", "door open", "front"];

/// Three rows, all on 1 March 2020.
pub const CORPUS_ONE_DAY: &str = "\
OK,01/03/2020  10:15:30,10.150.000,door open,front
FAIL,01/03/2020  10:16:02,,badge rejected,back
OK,01/03/2020  23:59:59,0.999.000,door closed,front
";

/// One row on 1 March, two on 2 March.
pub const CORPUS_TWO_DAYS: &str = "\
OK,01/03/2020  23:59:59,1.000,door open,front
OK,02/03/2020  00:00:00,2.000,door open,front
WARN,02/03/2020  00:00:01,,door held,side
";

/// Day A, day B, day A again.
pub const CORPUS_INTERLEAVED: &str = "\
OK,01/03/2020  10:00:00,1.000,a1,front
OK,02/03/2020  10:00:00,2.000,b1,front
OK,01/03/2020  11:00:00,3.000,a2,front
";

/// Second row has a timestamp in the wrong format.
pub const CORPUS_BAD_TIMESTAMP: &str = "\
OK,01/03/2020  10:15:30,1.000,door open,front
OK,2020-03-01 10:15:31,1.000,door open,front
";

/// Third row has only four fields.
pub const CORPUS_SHORT_ROW: &str = "\
OK,01/03/2020  10:15:30,1.000,door open,front
OK,01/03/2020  10:15:31,1.000,door open,front
OK,01/03/2020  10:15:32,1.000,door open
";

/// `per_day` rows for each of `days` consecutive days starting 1 March 2020,
/// in ascending time order.
pub fn corpus_sorted_days(days: u32, per_day: usize) -> String {
    let mut out = String::new();
    for day in 1..=days {
        for i in 0..per_day {
            out.push_str(&format!(
                "OK,{day:02}/03/2020  {:02}:{:02}:{:02},{i}.000,event {i},front\n",
                i / 3600 % 24,
                i / 60 % 60,
                i % 60
            ));
        }
    }
    out
}
