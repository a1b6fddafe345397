//! CRIT JSON fixture generators
//!
//! Each generator takes the values that legitimately vary between two
//! checkpoints of the same process (ids, addresses) as parameters, so two
//! calls with different offsets yield equivalent checkpoints.

use serde_json::{json, Value};

pub const LOG_PATH: &str = "/var/log/cedana-output-job.log";

/// `files.json` with two regular files, a pipe and the job's output log
pub fn files_json(id_offset: u64) -> Value {
    json!({
        "magic": "FILES",
        "entries": [
            {
                "id": id_offset + 1,
                "type": "REG",
                "reg": {"id": id_offset + 1, "flags": "O_RDONLY", "pos": 0, "fown": {"uid": 0}, "name": "/opt/workload/model.bin", "mode": 33188}
            },
            {
                "id": id_offset + 2,
                "type": "REG",
                "reg": {"id": id_offset + 2, "flags": "O_WRONLY | O_APPEND", "pos": 1024, "fown": {"uid": 0}, "name": LOG_PATH, "mode": 33188}
            },
            {
                "id": id_offset + 3,
                "type": "PIPE",
                "pipe": {"id": id_offset + 3, "pipe_id": 91234 + id_offset, "flags": "0x0"}
            },
            {
                "id": id_offset + 4,
                "type": "REG",
                "reg": {"id": id_offset + 4, "flags": "O_RDONLY", "pos": 4096, "fown": {"uid": 0}, "name": "/opt/workload/data.csv", "mode": 33188}
            }
        ]
    })
}

/// `files.json` whose data file is opened at a different position
pub fn files_json_with_moved_cursor(id_offset: u64) -> Value {
    let mut files = files_json(id_offset);
    files["entries"][3]["reg"]["pos"] = json!(8192);
    files
}

/// `mm-<pid>.json` with one VMA placed at `addr_base`
pub fn mm_json(addr_base: u64, dumpable: u64) -> Value {
    let hex = |offset: u64| format!("{:#x}", addr_base + offset);
    json!({
        "magic": "MM",
        "entries": [{
            "mm_start_code": hex(0x0),
            "mm_end_code": hex(0x1000),
            "mm_start_data": hex(0x2000),
            "mm_end_data": hex(0x3000),
            "mm_start_stack": hex(0x7000_0000),
            "mm_start_brk": hex(0x10_0000),
            "mm_brk": hex(0x12_1000),
            "mm_arg_start": hex(0x7000_1000),
            "mm_arg_end": hex(0x7000_1100),
            "mm_env_start": hex(0x7000_1100),
            "mm_env_end": hex(0x7000_2000),
            "mm_saved_auxv": [33, addr_base + 0x7000_3000, 16, 3219913727_u64],
            "exe_file_id": 1,
            "dumpable": dumpable,
            "thp_disabled": false,
            "vmas": [{
                "start": hex(0x0),
                "end": hex(0x1000),
                "pgoff": 0,
                "shmid": addr_base % 97,
                "prot": "PROT_READ | PROT_EXEC",
                "flags": "MAP_PRIVATE",
                "status": "VMA_AREA_REGULAR | VMA_FILE_PRIVATE",
                "fd": -1
            }]
        }]
    })
}

/// `mm-<pid>.json` with an extra anonymous VMA appended
pub fn mm_json_with_extra_vma(addr_base: u64) -> Value {
    let mut mm = mm_json(addr_base, 1);
    if let Some(vmas) = mm["entries"][0]["vmas"].as_array_mut() {
        vmas.push(json!({
            "start": "0x7f0000000000",
            "end": "0x7f0000021000",
            "pgoff": 0,
            "shmid": 0,
            "prot": "PROT_READ | PROT_WRITE",
            "flags": "MAP_PRIVATE | MAP_ANONYMOUS",
            "status": "VMA_AREA_REGULAR | VMA_ANON_PRIVATE",
            "fd": -1
        }));
    }
    mm
}

/// `pagemap-<pid>.json`: index record plus `pages` entries at `addr_base`.
///
/// The first `misses` entries get a page count no other fixture uses, so
/// they have no counterpart in a pagemap generated with `misses = 0`.
pub fn pagemap_json(addr_base: u64, pages: u64, misses: u64, pages_id: u64) -> Value {
    let mut entries = vec![json!({"pages_id": pages_id})];
    entries.extend((0..pages).map(|i| {
        let nr_pages = if i < misses { 100_000 + i } else { i + 1 };
        json!({
            "vaddr": format!("{:#x}", addr_base + i * 0x1000),
            "nr_pages": nr_pages,
            "flags": "PE_PRESENT"
        })
    }));
    json!({"magic": "PAGEMAP", "entries": entries})
}

pub fn inventory_json() -> Value {
    json!({"magic": "INVENTORY", "entries": [{"img_version": 2, "fdinfo_per_id": true, "root_ids": {"vm_id": 1, "files_id": 2, "fs_id": 3}}]})
}

pub fn fdinfo_json() -> Value {
    json!({"magic": "FDINFO", "entries": [{"id": 1, "flags": 0, "type": "REG", "fd": 0}]})
}

pub fn seccomp_json(mode: u64) -> Value {
    json!({"magic": "SECCOMP", "entries": [{"seccomp_filters": [], "mode": mode}]})
}

pub fn fs_json() -> Value {
    json!({"magic": "FS", "entries": [{"cwd_id": 4, "root_id": 5, "umask": 18}]})
}
