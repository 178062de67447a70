//! Static catalog documents used across harnesses.
//!
//! `SUMMARY_JSON` mirrors the shape the scraper writes, including the
//! zone-less timestamps and a deliberately malformed entry.

/// A realistic three-system document. `win10-broken` carries a non-string
/// title and must be skipped by the lenient decoder.
pub const SUMMARY_JSON: &str = r#"{
  "last_updated": "2024-05-01T12:30:00.500000",
  "systems": {
    "windows-11": {
      "name": "Windows 11",
      "type": "windows-11",
      "subtypes": {
        "win11-24h2": {
          "title": "Windows 11 24H2",
          "release_info": "2024 feature update, x64 and arm64",
          "version_info": "build 26100",
          "download_links": [
            {
              "version_title": "Windows 11 24H2 consumer editions",
              "sub_version": "x64",
              "download_link": "ed2k://|file|win11_24h2_x64.iso|6800000000|ABCDEF|/"
            },
            {
              "version_title": "Windows 11 24H2 consumer editions",
              "sub_version": "arm64",
              "download_link": "magnet:?xt=urn:btih:24h2arm64"
            }
          ],
          "url": "https://example.invalid/windows-11/win11-24h2/",
          "last_updated": "2024-04-30T08:00:00"
        },
        "win11-ltsc": {
          "title": "Windows 11 LTSC 2024",
          "release_info": "long-term servicing channel",
          "download_links": []
        }
      }
    },
    "windows-10": {
      "name": "Windows 10",
      "subtypes": {
        "win10-22h2": {
          "title": "Windows 10 22H2",
          "version_info": "build 19045",
          "download_links": [
            {
              "download_link": "ed2k://|file|win10_22h2_x64.iso|5900000000|123456|/"
            }
          ]
        },
        "win10-broken": {
          "title": 42
        }
      }
    },
    "servers": {
      "subtypes": {
        "sql-server-2019": {
          "title": "SQL Server 2019",
          "release_info": "released 2019"
        }
      }
    }
  }
}"#;

/// A document with no usable `systems` object.
pub const EMPTY_JSON: &str = r#"{"last_updated": "2024-05-01T00:00:00"}"#;
