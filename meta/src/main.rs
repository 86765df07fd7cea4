fn main() {
    multiversx_sc_meta_lib::cli_main::<election_dao::AbiProvider>();
}
