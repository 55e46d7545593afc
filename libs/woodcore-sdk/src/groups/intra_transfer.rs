use crate::endpoint::endpoint_group;

endpoint_group! {
    /// Transfers between accounts held at the same bank.
    pub struct IntraTransfer;
    table INTRA_TRANSFER_ENDPOINTS;

    /// Transfer funds between two accounts.
    fn create_intra_transfer => POST "/intratransfer",
        body [
            "fromOfficeId",
            "fromClientId",
            "fromAccountType",
            "fromAccountId",
            "toOfficeId",
            "toClientId",
            "toAccountType",
            "toAccountId",
            "transactionDate",
            "transferAmount",
            "comment",
        ];
    /// List account transfers.
    fn list_account_transfers, pages list_account_transfer_pages => GET "/accounttransfers",
        query ["page", "perPage"];
    /// Retrieve one account transfer.
    fn retrieve_intra_transfer => GET "/accounttransfers/{accountTransferId}";
}
