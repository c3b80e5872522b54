//! Sample capture files for the replay appliance.

use serde_json::{Value, json};

/// Capture with one source of each kind and a recorded report for each
pub fn sample_capture() -> Value {
    json!({
        "sources": [
            { "kind": "job", "id": "1a2b3c", "name": "default_job" },
            { "kind": "clip", "id": "c7" },
            { "kind": "file", "id": "/admin/http.pcap" }
        ],
        "reports": [
            {
                "source": "1a2b3c",
                "legend": ["start_time", "sum_traffic.total_bytes"],
                "rows": [
                    ["1496682540", 4096],
                    ["1496682600", 8192]
                ]
            },
            {
                "source": "c7",
                "legend": ["src_ip.addr", "dst_ip.addr", "sum_traffic.total_bytes"],
                "rows": [
                    ["10.1.1.1", "10.1.1.2", 1024],
                    ["10.1.1.3", "10.1.1.4", 512]
                ]
            },
            {
                "source": "/admin/http.pcap",
                "legend": ["app.name", "sum_traffic.packets"],
                "rows": [
                    ["HTTP", 120],
                    ["DNS", null]
                ]
            }
        ]
    })
}
