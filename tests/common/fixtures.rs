//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative logcat lines
//! mixed with the unrelated noise that real dumps contain.

use std::path::{Path, PathBuf};

/// Sender device: capture, encode, payload and mesh send for two frames,
/// with a retried `enc_out` for frame 7.
pub const CORPUS_SENDER: &[&str] = &[
    "--------- beginning of main",
    "01-02 10:00:00.000  812  830 I ActivityManager: Start proc 812:com.bitchat.android",
    "01-02 10:00:00.100  812  830 D latency: ev=cam_frame t=1000000 fid=7 w=640 h=480",
    "01-02 10:00:00.102  812  830 D latency: ev=enc_out t=3000000 fid=7 bytes=5120",
    "01-02 10:00:00.103  812  830 D latency: ev=enc_out t=3500000 fid=7 bytes=5120",
    "01-02 10:00:00.104  812  831 D latency: ev=video_payload t=4000000 fid=7 seq=1",
    "01-02 10:00:00.105  812  831 D latency: ev=mesh_send_call t=4500000 fid=7 seq=1",
    "01-02 10:00:00.133  812  830 D latency: ev=cam_frame t=34000000 fid=8 w=640 h=480",
    "01-02 10:00:00.137  812  830 D latency: ev=enc_out t=38000000 fid=8 bytes=4980",
    "01-02 10:00:00.138  812  830 W Choreographer: Skipped 3 frames!",
];

/// Receiver device: receive, decode and render for two sequence numbers.
pub const CORPUS_RECEIVER: &[&str] = &[
    "01-02 10:00:00.200  901  920 D latency: ev=rx_video t=500000 seq=1 from=aa:bb",
    "01-02 10:00:00.201  901  920 D latency: ev=dec_in t=1500000 seq=1",
    "01-02 10:00:00.210  901  922 D latency: ev=render_cb t=9500000 seq=1",
    "01-02 10:00:00.233  901  920 D latency: ev=rx_video t=33000000 seq=2 from=aa:bb",
    "01-02 10:00:00.234  901  920 D latency: ev=dec_in t=35000000 seq=2",
    "01-02 10:00:00.240  901  920 I chatty: uid=10123 identical 4 lines",
];

/// Relay device: fragments and reassembles, forwards, never renders.
pub const CORPUS_RELAY: &[&str] = &[
    "01-02 10:00:01.000  700  710 D latency: ev=frag_create t=100 fragId=f1",
    "01-02 10:00:01.000  700  710 D latency: ev=frag_split t=600 fragId=f1",
    "01-02 10:00:01.001  700  710 D latency: ev=frag_emit t=900 fragId=f1",
    "01-02 10:00:01.001  700  710 D latency: ev=frag_emit t=1300 fragId=f1",
    "01-02 10:00:01.002  700  711 D latency: ev=reasm_add t=2000 fragId=f1",
    "01-02 10:00:01.003  700  711 D latency: ev=reasm_done t=5000 fragId=f1",
];

/// Lines that must never produce an event.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "--------- beginning of system",
    "01-02 10:00:00.000  812  830 D OtherTag: ev=cam_frame t=1 fid=1",
    "01-02 10:00:00.000  812  830 D latency: started tracing",
    "01-02 10:00:00.000  812  830 D latency: ev=cam_frame fid=1",
    "01-02 10:00:00.000  812  830 D latency: t=5 fid=1",
    "01-02 10:00:00.000  812  830 D latency: ev=cam_frame t=12ms fid=1",
];

/// Write `lines` to `dir/name` and return the path.
pub fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, super::builders::log_body(lines)).unwrap();
    path
}
