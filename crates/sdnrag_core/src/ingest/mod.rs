pub mod controller_log;
pub mod pcap_csv;
