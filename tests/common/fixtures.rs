//! Sample documents.

/// A complete paper with every section header present.
pub const FULL_PAPER: &str = "\
Abstract:
We present a lock free ring buffer for audio pipelines on embedded boards.

Introduction:
Audio callbacks must never block, yet producers and consumers run on separate cores.

Requirements:
Bounded latency, zero allocation after startup, single producer and single consumer.

Methodology:
We model the buffer with atomic head and tail indices and verify it with loom.

Implementation:
The crate exposes a split API returning producer and consumer halves.

Results:
Median callback jitter dropped from 180 to 12 microseconds on a quad core board.

Conclusion:
Careful memory ordering makes wait free audio buffering practical.
";

/// Shares no section with [`FULL_PAPER`]'s wording and only has an abstract.
pub const UNRELATED_ABSTRACT: &str = "\
Abstract:
Medieval monastery gardens cultivated medicinal herbs alongside orchards.
";

/// Only a conclusion; never comparable with [`UNRELATED_ABSTRACT`].
pub const UNRELATED_CONCLUSION: &str = "\
Conclusion:
Tidal marsh restoration increased wading bird populations.
";

/// Same introduction as [`FULL_PAPER`], nothing else.
pub fn copied_introduction() -> String {
    "Introduction:\nAudio callbacks must never block, yet producers and consumers run on separate cores.\n"
        .to_string()
}
