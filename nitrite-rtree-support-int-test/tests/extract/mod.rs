mod extract_mbr_test;
