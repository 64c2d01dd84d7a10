// Network interface models

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInterface {
    pub iface: String,
    pub mac_address: String,
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceStats {
    pub iface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_sec: f64,
    pub tx_sec: f64,
}
