use crate::endpoint::endpoint_group;

endpoint_group! {
    /// Savings and fixed deposit accounts.
    pub struct Savings;
    table SAVINGS_ENDPOINTS;

    /// Open a savings account.
    fn create_savings_account => POST "/savingsaccounts",
        body ["clientId", "productId", "createdDate", "activate"];
    /// Activate a savings account.
    fn activate_savings_account => POST "/savingsaccounts/{accountId}/activate",
        body ["activatedOnDate"];
    /// List savings accounts.
    fn list_savings_accounts, pages list_savings_account_pages => GET "/savingsaccounts",
        query ["perPage", "page"];
    /// Retrieve one savings account.
    fn retrieve_savings_account => GET "/savingsaccounts/{accountId}";
    /// Deposit into a savings account.
    fn make_deposit => POST "/savingsaccounts/{accountId}/deposit",
        body ["transactionDate", "transactionAmount"];
    /// Withdraw from a savings account.
    fn make_withdrawal => POST "/savingsaccounts/{accountId}/withdraw",
        body ["transactionDate", "transactionAmount"];
    /// Undo or reverse a transaction, selected by `action`.
    fn undo_reverse_savings_account_transaction =>
        POST "/savingsaccounts/{accountId}/transactions/{transactionId}",
        query ["action"];
    /// List the transactions of a savings account.
    fn list_all_transactions, pages transaction_pages =>
        GET "/savingsaccounts/{accountId}/transactions",
        query ["perPage", "page"];
    /// Retrieve one savings transaction.
    fn retrieve_savings_account_transaction =>
        GET "/savingsaccounts/{accountId}/transactions/{transactionId}";
    /// Place a lien on part of the balance.
    fn lien_amount => POST "/savingsaccounts/{accountId}/lien",
        body ["transactionDate", "transactionAmount"];
    /// Release a lien.
    fn release_lien_amount => POST "/savingsaccounts/{accountId}/lien/{resourceId}",
        body [];
    /// List the liens on an account.
    fn list_all_liens => GET "/savingsaccounts/{accountId}/lien";
    /// Block an account.
    fn block_savings_account => POST "/savingsaccounts/{accountId}/block";
    /// Unblock an account.
    fn unblock_savings_account => POST "/savingsaccounts/{accountId}/unblock";
    /// Place a post-no-debit restriction.
    fn post_no_debit => POST "/savingsaccounts/{accountId}/setpnd";
    /// Remove a post-no-debit restriction.
    fn remove_no_debit => POST "/savingsaccounts/{accountId}/removepnd";
    /// Place a post-no-credit restriction.
    fn post_no_credit => POST "/savingsaccounts/{accountId}/setpnc";
    /// Remove a post-no-credit restriction.
    fn remove_no_credit => POST "/savingsaccounts/{accountId}/removepnc";
    /// List the charges on an account.
    fn list_savings_account_charges => GET "/savingsaccounts/{accountId}/charges";
    /// Retrieve one charge.
    fn retrieve_savings_account_charge => GET "/savingsaccounts/{accountId}/charges/{chargeId}";
    /// Submit a fixed deposit application.
    fn create_fixed_deposit_account => POST "/fixeddepositaccounts",
        body [
            "clientId",
            "productId",
            "createdDate",
            "depositAmount",
            "depositPeriod",
            "depositPeriodFrequencyId",
            "activate",
        ];
    /// Activate a fixed deposit account.
    fn activate_fixed_deposit_account => POST "/fixeddepositaccounts/{accountId}/activate",
        body ["activatedOnDate"];
    /// Close a matured fixed deposit account.
    fn close_fixed_deposit_account => POST "/fixeddepositaccounts/{accountId}/close",
        body ["closedOnDate", "onAccountClosureId", "toSavingsAccountId", "transferDescription", "note"];
    /// Close a fixed deposit account before maturity.
    fn premature_close_fixed_deposit_account =>
        POST "/fixeddepositaccounts/{accountId}/prematureClose",
        body ["closedOnDate", "note", "onAccountClosureId", "toSavingsAccountId", "transferDescription"];
    /// List fixed deposit accounts.
    fn list_fixed_deposit_accounts, pages fixed_deposit_account_pages => GET "/fixeddepositaccounts";
    /// Retrieve one fixed deposit account.
    fn retrieve_fixed_deposit_account => GET "/fixeddepositaccounts/{accountId}";
}
